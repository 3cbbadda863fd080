use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metric database model. A metric is a named, unit-carrying quantity that
/// device types may permit, e.g. state-of-charge in percent or power in kW.
/// `sampler` names the reading source the background sampler resolves when
/// recording values for this metric.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetricRow {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub sampler: String,
}

impl MetricRow {
    pub fn link(&self) -> String {
        format!("/api/v1/metrics/{}", self.id)
    }
}
