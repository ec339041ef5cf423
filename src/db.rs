use std::time::Duration;

use anyhow::Context;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};

use crate::config::DbConfig;

/// Creates the process-wide pool and checks that the server answers.
pub async fn connect(config: &DbConfig) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .context("connect to database")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("database ping")?;

    tracing::info!(
        max_connections = config.max_connections,
        "database connected"
    );
    Ok(pool)
}
