pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the catalog route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /movie                                           list (max 50 rows)
/// /movie/{id}                                      get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movie", movie::router())
}
