pub mod models;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DbConfig;

/// Database connection pool with retry logic and health checks.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(config: &DbConfig) -> Result<Self> {
        info!("initializing database connection pool");

        let pool = Self::connect_with_retry(config, 5).await?;
        Self::ping(&pool).await?;
        init_schema(&pool).await?;

        info!("database connection pool initialized");
        Ok(Self { pool })
    }

    /// Connect with exponential backoff retry logic.
    async fn connect_with_retry(config: &DbConfig, max_attempts: usize) -> Result<SqlitePool> {
        let mut attempt = 0;
        let mut delay = Duration::from_secs(1);

        loop {
            attempt += 1;
            match Self::try_connect(config).await {
                Ok(pool) => return Ok(pool),
                Err(e) if attempt >= max_attempts => {
                    return Err(e).context(format!(
                        "failed to connect to database after {} attempts",
                        max_attempts
                    ));
                }
                Err(e) => {
                    warn!(
                        "database connection attempt {}/{} failed: {}. retrying in {:?}",
                        attempt, max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn try_connect(config: &DbConfig) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .context("invalid database URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .context("failed to create database pool")?;

        Ok(pool)
    }

    pub async fn health_check(&self) -> Result<()> {
        Self::ping(&self.pool).await
    }

    async fn ping(pool: &SqlitePool) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(pool)
            .await
            .context("database health check failed")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(self) {
        info!("closing database connection pool");
        self.pool.close().await;
    }
}

/// Create the schema if it does not exist yet. Ordered so that foreign key
/// targets are created before their referents.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS sites (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS metrics (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL UNIQUE,
            unit    TEXT NOT NULL,
            sampler TEXT NOT NULL DEFAULT 'mock'
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS device_types (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS device_type_metrics (
            device_type_id INTEGER NOT NULL REFERENCES device_types(id) ON DELETE CASCADE,
            metric_id      INTEGER NOT NULL REFERENCES metrics(id) ON DELETE CASCADE,
            PRIMARY KEY (device_type_id, metric_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            site_id        INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            device_type_id INTEGER NOT NULL REFERENCES device_types(id) ON DELETE CASCADE,
            is_active      INTEGER NOT NULL DEFAULT 1
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS measures (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id   INTEGER NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
            metric_id   INTEGER NOT NULL REFERENCES metrics(id) ON DELETE CASCADE,
            value       REAL NOT NULL,
            recorded_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_devices_site ON devices(site_id)",
        "CREATE INDEX IF NOT EXISTS idx_measures_device_metric ON measures(device_id, metric_id, recorded_at)",
    ];

    for stmt in statements {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .context("failed to create schema")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn schema_bootstrap_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'measures'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn foreign_keys_cascade_from_sites_to_devices() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO sites (name) VALUES ('plant-a')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO device_types (name) VALUES ('battery')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO devices (name, site_id, device_type_id) VALUES ('b1', 1, 1)")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("DELETE FROM sites WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let devices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM devices")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(devices, 0);
    }
}
