use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::DeviceRow;

/// Repository for device rows.
pub struct DeviceRepository {
    pool: SqlitePool,
}

impl DeviceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        name: &str,
        site_id: i64,
        device_type_id: i64,
        is_active: bool,
    ) -> Result<DeviceRow, sqlx::Error> {
        let device = sqlx::query_as::<_, DeviceRow>(
            r#"
            INSERT INTO devices (name, site_id, device_type_id, is_active)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, site_id, device_type_id, is_active
            "#,
        )
        .bind(name)
        .bind(site_id)
        .bind(device_type_id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        debug!(device_id = device.id, name = %device.name, "device created");
        Ok(device)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<DeviceRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, site_id, device_type_id, is_active FROM devices WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<DeviceRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, site_id, device_type_id, is_active FROM devices ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Devices eligible for sampling.
    pub async fn list_active(&self) -> Result<Vec<DeviceRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, site_id, device_type_id, is_active FROM devices WHERE is_active = 1",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        site_id: i64,
        device_type_id: i64,
        is_active: bool,
    ) -> Result<Option<DeviceRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceRow>(
            r#"
            UPDATE devices SET name = ?, site_id = ?, device_type_id = ?, is_active = ?
            WHERE id = ?
            RETURNING id, name, site_id, device_type_id, is_active
            "#,
        )
        .bind(name)
        .bind(site_id)
        .bind(device_type_id)
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a device; measures cascade.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
