use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Device type database model, e.g. battery, inverter, PV panel, wind
/// turbine. The type determines which metrics its devices may report via the
/// `device_type_metrics` link table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeviceTypeRow {
    pub id: i64,
    pub name: String,
}

impl DeviceTypeRow {
    pub fn link(&self) -> String {
        format!("/api/v1/device-types/{}", self.id)
    }
}
