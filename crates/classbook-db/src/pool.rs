//! Connection pool bootstrap.

use std::time::Duration;

use anyhow::{Context, Result};
use classbook_config::DatabaseConfig;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// Schema for the document store.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects to PostgreSQL and brings the schema up to date.
///
/// A failed connection is retried up to `config.connect_retries` attempts in
/// total, sleeping one second longer after each failure.
///
/// # Errors
///
/// Returns the last connection error once every attempt has failed, or the
/// migration error if the schema cannot be applied.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let attempts = config.connect_retries.max(1);
    let mut attempt = 0;

    let pool = loop {
        attempt += 1;
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
        {
            Ok(pool) => break pool,
            Err(err) if attempt < attempts => {
                let delay = Duration::from_secs(u64::from(attempt));
                warn!(
                    attempt,
                    attempts,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to connect to database after {attempts} attempts")
                });
            }
        }
    };

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!(attempt, "Database connection established");
    Ok(pool)
}
