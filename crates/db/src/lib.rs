//! Postgres access for the media catalog.
//!
//! Two read paths live here and share nothing but the pool:
//! - [`projection`] turns any result cursor into schema-agnostic rows.
//! - [`repositories::MediaRepo`] decodes the fixed `media` column list into
//!   [`models::media::MediaRecord`].

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod projection;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
