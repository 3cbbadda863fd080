use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::devices::resolve_referents;
use crate::api::error::ApiError;
use crate::api::views::{
    DeviceSummary, DeviceTypeSummary, MetricSummary, ReadingHistory, ReadingPoint, SiteSummary,
};
use crate::sampler::AppState;

/// GET /api/v1/devices/:device_id/history/:metric_id - Reading history for
/// one metric on one device, newest first. The metric must be in the device
/// type's permitted set.
pub async fn reading_history(
    State(state): State<AppState>,
    Path((device_id, metric_id)): Path<(i64, i64)>,
) -> Result<Json<ReadingHistory>, ApiError> {
    let device = state
        .repos
        .db
        .devices()
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device {} not found", device_id)))?;

    let metric = state
        .repos
        .db
        .metrics()
        .find_by_id(metric_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Metric {} not found", metric_id)))?;

    if !state
        .repos
        .db
        .device_types()
        .has_metric(device.device_type_id, metric_id)
        .await?
    {
        return Err(ApiError::BadRequest(format!(
            "Metric {} is not permitted for this device's type",
            metric.name
        )));
    }

    let (site, device_type) =
        resolve_referents(&state, device.site_id, device.device_type_id).await?;

    let measures = state.repos.db.measures().history(device_id, metric_id).await?;

    Ok(Json(ReadingHistory {
        device: DeviceSummary::from(&device),
        site: SiteSummary::from(&site),
        device_type: DeviceTypeSummary::from(&device_type),
        metric: MetricSummary::from(&metric),
        history: measures.iter().map(ReadingPoint::from).collect(),
    }))
}
