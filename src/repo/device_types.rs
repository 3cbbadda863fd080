use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::{DeviceTypeRow, MetricRow};

/// Repository for device types and their permitted metric sets.
pub struct DeviceTypeRepository {
    pool: SqlitePool,
}

impl DeviceTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str) -> Result<DeviceTypeRow, sqlx::Error> {
        let device_type = sqlx::query_as::<_, DeviceTypeRow>(
            "INSERT INTO device_types (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(device_type_id = device_type.id, name = %device_type.name, "device type created");
        Ok(device_type)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<DeviceTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceTypeRow>("SELECT id, name FROM device_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<DeviceTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceTypeRow>("SELECT id, name FROM device_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update_name(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Option<DeviceTypeRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceTypeRow>(
            "UPDATE device_types SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM device_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The metrics a device of this type may report.
    pub async fn metrics_for_type(&self, type_id: i64) -> Result<Vec<MetricRow>, sqlx::Error> {
        sqlx::query_as::<_, MetricRow>(
            r#"
            SELECT m.id, m.name, m.unit, m.sampler
            FROM metrics m
            JOIN device_type_metrics dtm ON dtm.metric_id = m.id
            WHERE dtm.device_type_id = ?
            ORDER BY m.name
            "#,
        )
        .bind(type_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn has_metric(&self, type_id: i64, metric_id: i64) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM device_type_metrics WHERE device_type_id = ? AND metric_id = ?",
        )
        .bind(type_id)
        .bind(metric_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn attach_metric(&self, type_id: i64, metric_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO device_type_metrics (device_type_id, metric_id) VALUES (?, ?)")
            .bind(type_id)
            .bind(metric_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn detach_metric(&self, type_id: i64, metric_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM device_type_metrics WHERE device_type_id = ? AND metric_id = ?",
        )
        .bind(type_id)
        .bind(metric_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
