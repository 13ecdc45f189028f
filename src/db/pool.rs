use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::constants::DB_ACQUIRE_TIMEOUT_SECS;

/// Create a PostgreSQL connection pool
///
/// Requests beyond `max_connections` wait for a free connection, up to
/// `DB_ACQUIRE_TIMEOUT_SECS`; sqlx always bounds the wait.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "Creating database connection pool (max {} connections)...",
        max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(DB_ACQUIRE_TIMEOUT_SECS))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}
