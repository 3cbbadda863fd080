use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::views::{Deleted, MetricDetail, MetricSummary};
use crate::sampler::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct MetricPayload {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub unit: String,
    /// Reading source name; defaults to the mock source.
    #[serde(default = "default_sampler")]
    pub sampler: String,
}

fn default_sampler() -> String {
    "mock".to_string()
}

/// GET /api/v1/metrics - List all metrics
pub async fn list_metrics(
    State(state): State<AppState>,
) -> Result<Json<Vec<MetricSummary>>, ApiError> {
    let metrics = state.repos.db.metrics().list_all().await?;
    Ok(Json(metrics.iter().map(MetricSummary::from).collect()))
}

/// POST /api/v1/metrics - Create a metric
pub async fn create_metric(
    State(state): State<AppState>,
    Json(payload): Json<MetricPayload>,
) -> Result<(StatusCode, Json<MetricDetail>), ApiError> {
    payload.validate()?;
    let metric = state
        .repos
        .db
        .metrics()
        .insert(&payload.name, &payload.unit, &payload.sampler)
        .await?;
    Ok((StatusCode::CREATED, Json(MetricDetail::from(&metric))))
}

/// GET /api/v1/metrics/:id - Metric detail
pub async fn get_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MetricDetail>, ApiError> {
    let metric = state
        .repos
        .db
        .metrics()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Metric {} not found", id)))?;
    Ok(Json(MetricDetail::from(&metric)))
}

/// PUT /api/v1/metrics/:id - Update name, unit and sampler
pub async fn update_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MetricPayload>,
) -> Result<Json<MetricDetail>, ApiError> {
    payload.validate()?;
    let metric = state
        .repos
        .db
        .metrics()
        .update(id, &payload.name, &payload.unit, &payload.sampler)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Metric {} not found", id)))?;
    Ok(Json(MetricDetail::from(&metric)))
}

/// DELETE /api/v1/metrics/:id - Delete a metric, its type links and readings
pub async fn delete_metric(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let metrics = state.repos.db.metrics();
    let metric = metrics
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Metric {} not found", id)))?;
    metrics.delete(id).await?;
    Ok(Json(Deleted::new(format!("Metric {} deleted", metric.name))))
}
