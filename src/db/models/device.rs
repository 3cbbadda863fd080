use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Device database model. A device belongs to exactly one site and one device
/// type; inactive devices are skipped by the background sampler.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeviceRow {
    pub id: i64,
    pub name: String,
    pub site_id: i64,
    pub device_type_id: i64,
    pub is_active: bool,
}

impl DeviceRow {
    pub fn link(&self) -> String {
        format!("/api/v1/devices/{}", self.id)
    }

    pub fn history_link(&self, metric_id: i64) -> String {
        format!("/api/v1/devices/{}/history/{}", self.id, metric_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_link_includes_both_ids() {
        let device = DeviceRow {
            id: 3,
            name: "inverter-1".to_string(),
            site_id: 1,
            device_type_id: 2,
            is_active: true,
        };
        assert_eq!(device.link(), "/api/v1/devices/3");
        assert_eq!(device.history_link(9), "/api/v1/devices/3/history/9");
    }
}
