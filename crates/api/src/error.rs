use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moovie_core::error::CoreError;
use moovie_db::projection::ProjectionError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds database and projection
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses. Server-side failures never expose their cause to the client;
/// it is logged instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `moovie_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Projecting a result cursor into generic rows failed.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// A lookup failure deliberately reported like any other query failure.
    #[error("Database query failed")]
    QueryFailed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const QUERY_FAILED: &str = "Database query failed";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal(QUERY_FAILED)
            }

            // --- Projection errors ---
            AppError::Projection(err) => {
                tracing::error!(error = %err, "Row projection failed");
                match err {
                    ProjectionError::Read { .. } => internal("Error reading rows"),
                    ProjectionError::Iteration(_) => internal("Error iterating rows"),
                }
            }

            AppError::QueryFailed => internal(QUERY_FAILED),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(message: &str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        message.to_string(),
    )
}
