use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::models::MeasureRow;

/// Repository for recorded readings.
pub struct MeasureRepository {
    pool: SqlitePool,
}

impl MeasureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        device_id: i64,
        metric_id: i64,
        value: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<MeasureRow, sqlx::Error> {
        sqlx::query_as::<_, MeasureRow>(
            r#"
            INSERT INTO measures (device_id, metric_id, value, recorded_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, device_id, metric_id, value, recorded_at
            "#,
        )
        .bind(device_id)
        .bind(metric_id)
        .bind(value)
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await
    }

    /// The most recent reading per metric for a device. Rowids are monotonic
    /// within a device's insert stream, so MAX(id) per metric picks the
    /// newest row.
    pub async fn latest_per_metric(&self, device_id: i64) -> Result<Vec<MeasureRow>, sqlx::Error> {
        sqlx::query_as::<_, MeasureRow>(
            r#"
            SELECT id, device_id, metric_id, value, recorded_at
            FROM measures
            WHERE id IN (
                SELECT MAX(id) FROM measures WHERE device_id = ? GROUP BY metric_id
            )
            ORDER BY metric_id
            "#,
        )
        .bind(device_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Full reading history for a device/metric pair, newest first.
    pub async fn history(
        &self,
        device_id: i64,
        metric_id: i64,
    ) -> Result<Vec<MeasureRow>, sqlx::Error> {
        sqlx::query_as::<_, MeasureRow>(
            r#"
            SELECT id, device_id, metric_id, value, recorded_at
            FROM measures
            WHERE device_id = ? AND metric_id = ?
            ORDER BY recorded_at DESC, id DESC
            "#,
        )
        .bind(device_id)
        .bind(metric_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_for_device(&self, device_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM measures WHERE device_id = ?")
            .bind(device_id)
            .fetch_one(&self.pool)
            .await
    }
}
