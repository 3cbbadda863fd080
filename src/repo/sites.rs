use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::{DeviceRow, SiteRow};

/// Repository for site rows.
pub struct SiteRepository {
    pool: SqlitePool,
}

impl SiteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, name: &str) -> Result<SiteRow, sqlx::Error> {
        let site = sqlx::query_as::<_, SiteRow>(
            "INSERT INTO sites (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(site_id = site.id, name = %site.name, "site created");
        Ok(site)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SiteRow>, sqlx::Error> {
        sqlx::query_as::<_, SiteRow>("SELECT id, name FROM sites WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<SiteRow>, sqlx::Error> {
        sqlx::query_as::<_, SiteRow>("SELECT id, name FROM sites ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update_name(&self, id: i64, name: &str) -> Result<Option<SiteRow>, sqlx::Error> {
        sqlx::query_as::<_, SiteRow>(
            "UPDATE sites SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a site; devices cascade. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sites WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn devices_for_site(&self, site_id: i64) -> Result<Vec<DeviceRow>, sqlx::Error> {
        sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT id, name, site_id, device_type_id, is_active
            FROM devices
            WHERE site_id = ?
            ORDER BY name
            "#,
        )
        .bind(site_id)
        .fetch_all(&self.pool)
        .await
    }
}
