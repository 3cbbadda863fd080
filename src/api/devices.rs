use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::views::{
    Deleted, DeviceDetail, DeviceSummary, DeviceTypeSummary, LastReading, SiteSummary,
};
use crate::db::models::{DeviceTypeRow, SiteRow};
use crate::sampler::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct DevicePayload {
    /// Optional; an empty or missing name defaults to the device type name.
    #[serde(default)]
    #[validate(length(max = 128))]
    pub name: String,
    pub site_id: i64,
    pub device_type_id: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /api/v1/devices - List all devices
pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceSummary>>, ApiError> {
    let devices = state.repos.db.devices().list_all().await?;
    Ok(Json(devices.iter().map(DeviceSummary::from).collect()))
}

/// POST /api/v1/devices - Create a device under a site and device type
pub async fn create_device(
    State(state): State<AppState>,
    Json(payload): Json<DevicePayload>,
) -> Result<(StatusCode, Json<DeviceSummary>), ApiError> {
    payload.validate()?;
    let (_site, device_type) =
        resolve_referents(&state, payload.site_id, payload.device_type_id).await?;

    let name = if payload.name.is_empty() {
        device_type.name.clone()
    } else {
        payload.name.clone()
    };

    let device = state
        .repos
        .db
        .devices()
        .insert(&name, payload.site_id, payload.device_type_id, payload.is_active)
        .await?;
    Ok((StatusCode::CREATED, Json(DeviceSummary::from(&device))))
}

/// GET /api/v1/devices/:id - Device detail with the latest reading per metric
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeviceDetail>, ApiError> {
    let device = state
        .repos
        .db
        .devices()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device {} not found", id)))?;

    let (site, device_type) =
        resolve_referents(&state, device.site_id, device.device_type_id).await?;

    let metrics = state.repos.db.metrics();
    let mut last_readings = Vec::new();
    for measure in state.repos.db.measures().latest_per_metric(id).await? {
        // Metric rows cascade-delete their measures, so this lookup only
        // misses if the metric vanished mid-request.
        if let Some(metric) = metrics.find_by_id(measure.metric_id).await? {
            last_readings.push(LastReading {
                metric: metric.name,
                unit: metric.unit,
                value: measure.value,
                recorded_at: measure.recorded_at,
                history: device.history_link(metric.id),
            });
        }
    }

    Ok(Json(DeviceDetail {
        id: device.id,
        name: device.name.clone(),
        is_active: device.is_active,
        link: device.link(),
        site: SiteSummary::from(&site),
        device_type: DeviceTypeSummary::from(&device_type),
        last_readings,
    }))
}

/// PUT /api/v1/devices/:id - Update name, site, type and active flag
pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DevicePayload>,
) -> Result<Json<DeviceSummary>, ApiError> {
    payload.validate()?;
    let (_, device_type) =
        resolve_referents(&state, payload.site_id, payload.device_type_id).await?;

    let name = if payload.name.is_empty() {
        device_type.name.clone()
    } else {
        payload.name.clone()
    };

    let device = state
        .repos
        .db
        .devices()
        .update(id, &name, payload.site_id, payload.device_type_id, payload.is_active)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device {} not found", id)))?;
    Ok(Json(DeviceSummary::from(&device)))
}

/// DELETE /api/v1/devices/:id - Delete a device and its readings
pub async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let devices = state.repos.db.devices();
    let device = devices
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device {} not found", id)))?;
    devices.delete(id).await?;
    Ok(Json(Deleted::new(format!("Device {} deleted", device.name))))
}

/// Load and 404-check the site and device type a device points at.
pub(crate) async fn resolve_referents(
    state: &AppState,
    site_id: i64,
    device_type_id: i64,
) -> Result<(SiteRow, DeviceTypeRow), ApiError> {
    let site = state
        .repos
        .db
        .sites()
        .find_by_id(site_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Site {} not found", site_id)))?;
    let device_type = state
        .repos
        .db
        .device_types()
        .find_by_id(device_type_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device type {} not found", device_type_id)))?;
    Ok((site, device_type))
}
