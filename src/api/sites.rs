use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::views::{Deleted, DeviceSummary, SiteDetail, SiteSummary};
use crate::sampler::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SitePayload {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

/// GET /api/v1/sites - List all sites
pub async fn list_sites(State(state): State<AppState>) -> Result<Json<Vec<SiteSummary>>, ApiError> {
    let sites = state.repos.db.sites().list_all().await?;
    Ok(Json(sites.iter().map(SiteSummary::from).collect()))
}

/// POST /api/v1/sites - Create a site
pub async fn create_site(
    State(state): State<AppState>,
    Json(payload): Json<SitePayload>,
) -> Result<(StatusCode, Json<SiteSummary>), ApiError> {
    payload.validate()?;
    let site = state.repos.db.sites().insert(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(SiteSummary::from(&site))))
}

/// GET /api/v1/sites/:id - Site detail with its devices
pub async fn get_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SiteDetail>, ApiError> {
    let sites = state.repos.db.sites();
    let site = sites
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Site {} not found", id)))?;
    let devices = sites.devices_for_site(id).await?;

    Ok(Json(SiteDetail {
        id: site.id,
        name: site.name.clone(),
        link: site.link(),
        devices: devices.iter().map(DeviceSummary::from).collect(),
    }))
}

/// PUT /api/v1/sites/:id - Rename a site
pub async fn update_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SitePayload>,
) -> Result<Json<SiteSummary>, ApiError> {
    payload.validate()?;
    let site = state
        .repos
        .db
        .sites()
        .update_name(id, &payload.name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Site {} not found", id)))?;
    Ok(Json(SiteSummary::from(&site)))
}

/// DELETE /api/v1/sites/:id - Delete a site and its devices
pub async fn delete_site(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let sites = state.repos.db.sites();
    let site = sites
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Site {} not found", id)))?;
    sites.delete(id).await?;
    Ok(Json(Deleted::new(format!("Site {} deleted", site.name))))
}
