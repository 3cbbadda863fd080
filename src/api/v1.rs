use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{device_types, devices, health, history, metrics, sites};
use crate::sampler::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sites", get(sites::list_sites).post(sites::create_site))
        .route(
            "/sites/:id",
            get(sites::get_site)
                .put(sites::update_site)
                .delete(sites::delete_site),
        )
        .route(
            "/device-types",
            get(device_types::list_device_types).post(device_types::create_device_type),
        )
        .route(
            "/device-types/:id",
            get(device_types::get_device_type)
                .put(device_types::update_device_type)
                .delete(device_types::delete_device_type),
        )
        .route(
            "/device-types/:id/metrics/:metric_id",
            post(device_types::attach_metric).delete(device_types::detach_metric),
        )
        .route(
            "/metrics",
            get(metrics::list_metrics).post(metrics::create_metric),
        )
        .route(
            "/metrics/:id",
            get(metrics::get_metric)
                .put(metrics::update_metric)
                .delete(metrics::delete_metric),
        )
        .route(
            "/devices",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/devices/:id",
            get(devices::get_device)
                .put(devices::update_device)
                .delete(devices::delete_device),
        )
        .route(
            "/devices/:device_id/history/:metric_id",
            get(history::reading_history),
        )
        .route("/healthz", get(health::healthz))
        .route("/health", get(health::health_check))
        .with_state(state)
}
