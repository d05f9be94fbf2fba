//! Repository for the `media` table.

use futures::stream::BoxStream;
use moovie_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::models::media::MediaRecord;

/// Column list decoded into [`MediaRecord`]. Must stay in step with the
/// struct's `#[sqlx(rename)]` attributes.
pub const COLUMNS: &str = "mediaid, type, name, originallanguage, adult, releasedate, \
     overview, backdroppath, posterpath, trailerlink, tmdbrating, status";

/// Hard cap on rows returned by [`MediaRepo::stream_rows`].
pub const LIST_LIMIT: i64 = 50;

/// Read-only access to the media catalog.
pub struct MediaRepo;

impl MediaRepo {
    /// Stream every stored column of up to [`LIST_LIMIT`] rows, lowest id first.
    ///
    /// Selects `*` on purpose: the rows feed [`crate::projection::project`],
    /// which reports columns exactly as storage names them.
    pub fn stream_rows(pool: &PgPool) -> BoxStream<'_, Result<PgRow, sqlx::Error>> {
        sqlx::query("SELECT * FROM media ORDER BY mediaid LIMIT $1")
            .bind(LIST_LIMIT)
            .fetch(pool)
    }

    /// Find a media record by id.
    ///
    /// Returns `Ok(None)` when no row matches. A row that exists but cannot
    /// be decoded (NULL in a required column, retyped column) is an error.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE mediaid = $1");
        sqlx::query_as::<_, MediaRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
