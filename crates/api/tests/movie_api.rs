//! Integration tests for the `/movie` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, get, seed_media};
use moovie_db::models::media::MediaRecord;
use sqlx::PgPool;

const COLUMN_KEYS: [&str; 12] = [
    "mediaid",
    "type",
    "name",
    "originallanguage",
    "adult",
    "releasedate",
    "overview",
    "backdroppath",
    "posterpath",
    "trailerlink",
    "tmdbrating",
    "status",
];

// ---------------------------------------------------------------------------
// GET /movie/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_returns_typed_record(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/movie/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(text.contains(r#""name":"Inception""#), "got {text}");
    assert!(text.contains(r#""tmdbrating":8.8"#), "got {text}");

    let record: MediaRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(record.id, 1);
    assert!(!record.is_series);
    assert_eq!(record.release_date.map(|d| d.to_string()).as_deref(), Some("2010-07-16"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_absent_id_returns_404(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/movie/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Media with id 999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_malformed_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/movie/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn legacy_mode_reports_absent_id_as_server_error(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    let config = moovie_api::config::ServerConfig {
        legacy_not_found_status: true,
        ..common::test_config()
    };
    let app = common::build_test_app_with(pool, config);

    let response = get(app.clone(), "/movie/999").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Database query failed");

    let response = get(app.clone(), "/movie/abc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get(app, "/movie/1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_undecodable_row_returns_opaque_500(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    sqlx::query("ALTER TABLE media ALTER COLUMN status DROP NOT NULL")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE media SET status = NULL")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/movie/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Database query failed");
}

// ---------------------------------------------------------------------------
// GET /movie
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_every_seeded_row_with_all_columns(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    seed_media(&pool, 2, "Dark", true, 8.4).await;
    seed_media(&pool, 3, "Heat", false, 7.9).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/movie").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().expect("list body must be an array");
    assert_eq!(items.len(), 3);
    for item in items {
        let object = item.as_object().unwrap();
        for key in COLUMN_KEYS {
            assert!(object.contains_key(key), "missing key {key} in {item}");
        }
        assert_eq!(object.len(), COLUMN_KEYS.len());
    }
    assert_eq!(items[0]["name"], "Inception");
    assert_eq!(items[1]["type"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fixed_width_and_numeric_columns_are_served(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    sqlx::query("ALTER TABLE media ALTER COLUMN originallanguage TYPE CHAR(2)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("ALTER TABLE media ADD COLUMN budget NUMERIC NOT NULL DEFAULT 160000000")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/movie").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["originallanguage"], "en");
    assert_eq!(json[0]["budget"], 160000000.0);

    let response = get(app, "/movie/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["originallanguage"], "en");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_capped_at_fifty(pool: PgPool) {
    for id in 1..=55 {
        seed_media(&pool, id, &format!("Title {id}"), false, 5.0).await;
    }
    let app = common::build_test_app(pool);

    let response = get(app, "/movie").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_on_empty_table_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/movie").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_with_unreadable_column_returns_opaque_500(pool: PgPool) {
    seed_media(&pool, 1, "Inception", false, 8.8).await;
    sqlx::query("ALTER TABLE media ADD COLUMN location POINT NOT NULL DEFAULT POINT(0, 0)")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/movie").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Error reading rows");
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_without_table_returns_opaque_500(pool: PgPool) {
    sqlx::query("DROP TABLE media").execute(&pool).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/movie").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Error iterating rows");
}
