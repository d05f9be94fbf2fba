#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use moovie_api::config::ServerConfig;
use moovie_api::router::build_app_router;
use moovie_api::state::AppState;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        legacy_not_found_status: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Insert a media row with filler values for every column except the ones
/// the scenarios care about.
pub async fn seed_media(pool: &PgPool, id: i32, name: &str, is_series: bool, rating: f32) {
    sqlx::query(
        "INSERT INTO media (mediaid, type, name, originallanguage, adult, releasedate, \
         overview, backdroppath, posterpath, trailerlink, tmdbrating, status) \
         VALUES ($1, $2, $3, 'en', FALSE, DATE '2010-07-16', '', '/b.jpg', '/p.jpg', \
         'https://trailers.example.com', $4, 'Released')",
    )
    .bind(id)
    .bind(is_series)
    .bind(name)
    .bind(rating)
    .execute(pool)
    .await
    .unwrap();
}
