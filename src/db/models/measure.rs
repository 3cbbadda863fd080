use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded reading of one metric for one device.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeasureRow {
    pub id: i64,
    pub device_id: i64,
    pub metric_id: i64,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}
