use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the PostgreSQL pool backing the résumé store.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to résumé store...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("Résumé store pool established");
    Ok(pool)
}
