//! Response shapes for the JSON API. Summaries carry a `link` field pointing
//! at the canonical detail URL so clients can navigate without building URLs
//! themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::{DeviceRow, DeviceTypeRow, MeasureRow, MetricRow, SiteRow};

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub id: i64,
    pub name: String,
    pub link: String,
}

impl From<&SiteRow> for SiteSummary {
    fn from(site: &SiteRow) -> Self {
        Self {
            id: site.id,
            name: site.name.clone(),
            link: site.link(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SiteDetail {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub devices: Vec<DeviceSummary>,
}

#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub link: String,
}

impl From<&DeviceRow> for DeviceSummary {
    fn from(device: &DeviceRow) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            is_active: device.is_active,
            link: device.link(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceTypeSummary {
    pub id: i64,
    pub name: String,
    pub link: String,
}

impl From<&DeviceTypeRow> for DeviceTypeSummary {
    fn from(device_type: &DeviceTypeRow) -> Self {
        Self {
            id: device_type.id,
            name: device_type.name.clone(),
            link: device_type.link(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceTypeDetail {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub metrics: Vec<MetricSummary>,
}

#[derive(Debug, Serialize)]
pub struct MetricSummary {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub link: String,
}

impl From<&MetricRow> for MetricSummary {
    fn from(metric: &MetricRow) -> Self {
        Self {
            id: metric.id,
            name: metric.name.clone(),
            unit: metric.unit.clone(),
            link: metric.link(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricDetail {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub sampler: String,
    pub link: String,
}

impl From<&MetricRow> for MetricDetail {
    fn from(metric: &MetricRow) -> Self {
        Self {
            id: metric.id,
            name: metric.name.clone(),
            unit: metric.unit.clone(),
            sampler: metric.sampler.clone(),
            link: metric.link(),
        }
    }
}

/// The most recent reading of one metric, shown on the device detail view.
#[derive(Debug, Serialize)]
pub struct LastReading {
    pub metric: String,
    pub unit: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
    pub history: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceDetail {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub link: String,
    pub site: SiteSummary,
    pub device_type: DeviceTypeSummary,
    pub last_readings: Vec<LastReading>,
}

#[derive(Debug, Serialize)]
pub struct ReadingPoint {
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<&MeasureRow> for ReadingPoint {
    fn from(measure: &MeasureRow) -> Self {
        Self {
            value: measure.value,
            recorded_at: measure.recorded_at,
        }
    }
}

/// Full history of one metric on one device, with enough context to render a
/// chart header.
#[derive(Debug, Serialize)]
pub struct ReadingHistory {
    pub device: DeviceSummary,
    pub site: SiteSummary,
    pub device_type: DeviceTypeSummary,
    pub metric: MetricSummary,
    pub history: Vec<ReadingPoint>,
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
    pub message: String,
}

impl Deleted {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}
