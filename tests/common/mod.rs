#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use device_monitor::config::Config;
use device_monitor::repo::Repositories;
use device_monitor::sampler::AppState;

/// Router plus state backed by a fresh in-memory database.
pub async fn test_app() -> (Router, AppState) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    device_monitor::db::init_schema(&pool).await.unwrap();

    let mut cfg = Config::default();
    cfg.sampler.enabled = false;

    let state = AppState::from_repos(cfg.clone(), Arc::new(Repositories::from_pool(pool)));
    let app = device_monitor::api::router(state.clone(), &cfg);
    (app, state)
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::DELETE, uri, None).await
}

/// Seed one site, device type, metric (attached to the type) and device.
/// Returns (site_id, device_type_id, metric_id, device_id).
pub async fn seed_fleet(app: &Router) -> (i64, i64, i64, i64) {
    let (status, site) = post(app, "/api/v1/sites", serde_json::json!({"name": "north-field"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, device_type) =
        post(app, "/api/v1/device-types", serde_json::json!({"name": "battery"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, metric) = post(
        app,
        "/api/v1/metrics",
        serde_json::json!({"name": "state-of-charge", "unit": "%"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let type_id = device_type["id"].as_i64().unwrap();
    let metric_id = metric["id"].as_i64().unwrap();
    let (status, _) = post(
        app,
        &format!("/api/v1/device-types/{}/metrics/{}", type_id, metric_id),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, device) = post(
        app,
        "/api/v1/devices",
        serde_json::json!({
            "name": "battery-1",
            "site_id": site["id"],
            "device_type_id": type_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (
        site["id"].as_i64().unwrap(),
        type_id,
        metric_id,
        device["id"].as_i64().unwrap(),
    )
}
