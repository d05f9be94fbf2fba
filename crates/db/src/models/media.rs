//! Media catalog entity model.

use chrono::NaiveDate;
use moovie_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media` table.
///
/// Fields are decoded by column name, not position, from the list in
/// [`crate::repositories::media_repo::COLUMNS`]. Reordering or adding
/// columns in storage is harmless. Renaming, dropping or retyping one of the
/// listed columns makes every fetch fail with a decode error, so schema
/// changes must be mirrored here and in that list together.
///
/// JSON keys are the stored column names.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct MediaRecord {
    #[sqlx(rename = "mediaid")]
    #[serde(rename = "mediaid")]
    pub id: DbId,
    /// `true` for a series, `false` for a movie.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub is_series: bool,
    pub name: String,
    /// ISO 639-1 code, e.g. `en`.
    #[sqlx(rename = "originallanguage")]
    #[serde(rename = "originallanguage")]
    pub original_language: String,
    #[sqlx(rename = "adult")]
    #[serde(rename = "adult")]
    pub is_adult: bool,
    #[sqlx(rename = "releasedate")]
    #[serde(rename = "releasedate")]
    pub release_date: Option<NaiveDate>,
    pub overview: String,
    #[sqlx(rename = "backdroppath")]
    #[serde(rename = "backdroppath")]
    pub backdrop_path: String,
    #[sqlx(rename = "posterpath")]
    #[serde(rename = "posterpath")]
    pub poster_path: String,
    #[sqlx(rename = "trailerlink")]
    #[serde(rename = "trailerlink")]
    pub trailer_link: String,
    /// Score reported by TMDB.
    #[sqlx(rename = "tmdbrating")]
    #[serde(rename = "tmdbrating")]
    pub tmdb_rating: f32,
    /// Free-text release status such as `Released`.
    pub status: String,
}
