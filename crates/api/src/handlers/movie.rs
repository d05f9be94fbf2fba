//! Handlers for the `/movie` resource.

use axum::extract::{Path, State};
use axum::Json;
use futures::TryStreamExt;
use moovie_core::error::CoreError;
use moovie_core::types::parse_db_id;
use moovie_db::models::media::MediaRecord;
use moovie_db::projection::{project, GenericRow};
use moovie_db::repositories::MediaRepo;
use moovie_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /movie
///
/// Every stored column of up to 50 rows, keyed by column name. The body is
/// built only after the whole cursor has been projected.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<GenericRow>>> {
    let rows: Vec<GenericRow> = project(MediaRepo::stream_rows(&state.pool))
        .try_collect()
        .await?;
    tracing::debug!(count = rows.len(), "Listed media rows");
    Ok(Json(rows))
}

/// GET /movie/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MediaRecord>> {
    match fetch(&state.pool, &raw_id).await {
        Ok(media) => Ok(Json(media)),
        Err(AppError::Core(err)) if state.config.legacy_not_found_status => {
            tracing::debug!(error = %err, "Reporting lookup failure as query failure");
            Err(AppError::QueryFailed)
        }
        Err(err) => Err(err),
    }
}

async fn fetch(pool: &DbPool, raw_id: &str) -> AppResult<MediaRecord> {
    let id = parse_db_id(raw_id)?;
    MediaRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))
}
