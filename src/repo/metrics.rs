use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::MetricRow;

/// Repository for metric rows.
pub struct MetricRepository {
    pool: SqlitePool,
}

impl MetricRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        name: &str,
        unit: &str,
        sampler: &str,
    ) -> Result<MetricRow, sqlx::Error> {
        let metric = sqlx::query_as::<_, MetricRow>(
            r#"
            INSERT INTO metrics (name, unit, sampler)
            VALUES (?, ?, ?)
            RETURNING id, name, unit, sampler
            "#,
        )
        .bind(name)
        .bind(unit)
        .bind(sampler)
        .fetch_one(&self.pool)
        .await?;

        debug!(metric_id = metric.id, name = %metric.name, "metric created");
        Ok(metric)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<MetricRow>, sqlx::Error> {
        sqlx::query_as::<_, MetricRow>("SELECT id, name, unit, sampler FROM metrics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<MetricRow>, sqlx::Error> {
        sqlx::query_as::<_, MetricRow>("SELECT id, name, unit, sampler FROM metrics ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        unit: &str,
        sampler: &str,
    ) -> Result<Option<MetricRow>, sqlx::Error> {
        sqlx::query_as::<_, MetricRow>(
            r#"
            UPDATE metrics SET name = ?, unit = ?, sampler = ?
            WHERE id = ?
            RETURNING id, name, unit, sampler
            "#,
        )
        .bind(name)
        .bind(unit)
        .bind(sampler)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a metric; type links and measures cascade.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM metrics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
