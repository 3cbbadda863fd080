use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::views::{Deleted, DeviceTypeDetail, DeviceTypeSummary, MetricSummary};
use crate::db::models::DeviceTypeRow;
use crate::repo::DeviceTypeRepository;
use crate::sampler::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct DeviceTypePayload {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

/// GET /api/v1/device-types - List all device types
pub async fn list_device_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceTypeSummary>>, ApiError> {
    let device_types = state.repos.db.device_types().list_all().await?;
    Ok(Json(
        device_types.iter().map(DeviceTypeSummary::from).collect(),
    ))
}

/// POST /api/v1/device-types - Create a device type
pub async fn create_device_type(
    State(state): State<AppState>,
    Json(payload): Json<DeviceTypePayload>,
) -> Result<(StatusCode, Json<DeviceTypeSummary>), ApiError> {
    payload.validate()?;
    let device_type = state.repos.db.device_types().insert(&payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(DeviceTypeSummary::from(&device_type)),
    ))
}

/// GET /api/v1/device-types/:id - Device type detail with its metric set
pub async fn get_device_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeviceTypeDetail>, ApiError> {
    let repo = state.repos.db.device_types();
    let device_type = find_device_type(&repo, id).await?;
    detail(&repo, device_type).await
}

/// PUT /api/v1/device-types/:id - Rename a device type
pub async fn update_device_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeviceTypePayload>,
) -> Result<Json<DeviceTypeSummary>, ApiError> {
    payload.validate()?;
    let device_type = state
        .repos
        .db
        .device_types()
        .update_name(id, &payload.name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device type {} not found", id)))?;
    Ok(Json(DeviceTypeSummary::from(&device_type)))
}

/// DELETE /api/v1/device-types/:id - Delete a device type and its devices
pub async fn delete_device_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let repo = state.repos.db.device_types();
    let device_type = find_device_type(&repo, id).await?;
    repo.delete(id).await?;
    Ok(Json(Deleted::new(format!(
        "Device type {} deleted",
        device_type.name
    ))))
}

/// POST /api/v1/device-types/:id/metrics/:metric_id - Permit a metric for
/// devices of this type
pub async fn attach_metric(
    State(state): State<AppState>,
    Path((id, metric_id)): Path<(i64, i64)>,
) -> Result<Json<DeviceTypeDetail>, ApiError> {
    let repo = state.repos.db.device_types();
    let device_type = find_device_type(&repo, id).await?;

    state
        .repos
        .db
        .metrics()
        .find_by_id(metric_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Metric {} not found", metric_id)))?;

    if repo.has_metric(id, metric_id).await? {
        return Err(ApiError::Conflict(
            "Metric already attached to device type".to_string(),
        ));
    }

    repo.attach_metric(id, metric_id).await?;
    detail(&repo, device_type).await
}

/// DELETE /api/v1/device-types/:id/metrics/:metric_id - Remove a metric from
/// the permitted set
pub async fn detach_metric(
    State(state): State<AppState>,
    Path((id, metric_id)): Path<(i64, i64)>,
) -> Result<Json<DeviceTypeDetail>, ApiError> {
    let repo = state.repos.db.device_types();
    let device_type = find_device_type(&repo, id).await?;

    if !repo.detach_metric(id, metric_id).await? {
        return Err(ApiError::NotFound(
            "Metric not attached to device type".to_string(),
        ));
    }

    detail(&repo, device_type).await
}

async fn find_device_type(
    repo: &DeviceTypeRepository,
    id: i64,
) -> Result<DeviceTypeRow, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device type {} not found", id)))
}

async fn detail(
    repo: &DeviceTypeRepository,
    device_type: DeviceTypeRow,
) -> Result<Json<DeviceTypeDetail>, ApiError> {
    let metrics = repo.metrics_for_type(device_type.id).await?;
    Ok(Json(DeviceTypeDetail {
        id: device_type.id,
        name: device_type.name.clone(),
        link: device_type.link(),
        metrics: metrics.iter().map(MetricSummary::from).collect(),
    }))
}
