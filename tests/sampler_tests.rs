mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{get, post, put, seed_fleet, test_app};
use device_monitor::sampler::sample_once;

#[tokio::test]
async fn sampling_records_one_reading_per_permitted_metric() {
    let (app, state) = test_app().await;
    let (_, _, _, device_id) = seed_fleet(&app).await;

    let recorded = sample_once(&state.repos).await.unwrap();
    assert_eq!(recorded, 1);

    let (status, device) = get(&app, &format!("/api/v1/devices/{}", device_id)).await;
    assert_eq!(status, StatusCode::OK);

    let readings = device["last_readings"].as_array().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0]["metric"], "state-of-charge");
    assert_eq!(readings[0]["unit"], "%");
    let value = readings[0]["value"].as_f64().unwrap();
    assert!((1.0..100.0).contains(&value));
}

#[tokio::test]
async fn inactive_devices_are_skipped() {
    let (app, state) = test_app().await;
    let (site_id, type_id, _, device_id) = seed_fleet(&app).await;

    let (status, _) = put(
        &app,
        &format!("/api/v1/devices/{}", device_id),
        json!({
            "name": "battery-1",
            "site_id": site_id,
            "device_type_id": type_id,
            "is_active": false,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let recorded = sample_once(&state.repos).await.unwrap();
    assert_eq!(recorded, 0);
}

#[tokio::test]
async fn metrics_with_unknown_sources_are_skipped() {
    let (app, state) = test_app().await;
    let (_, type_id, _, _) = seed_fleet(&app).await;

    let (_, metric) = post(
        &app,
        "/api/v1/metrics",
        json!({"name": "grid-frequency", "unit": "Hz", "sampler": "modbus"}),
    )
    .await;
    let (status, _) = post(
        &app,
        &format!(
            "/api/v1/device-types/{}/metrics/{}",
            type_id,
            metric["id"].as_i64().unwrap()
        ),
        serde_json::Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Only the mock-backed state-of-charge metric is recorded.
    let recorded = sample_once(&state.repos).await.unwrap();
    assert_eq!(recorded, 1);
}

#[tokio::test]
async fn history_returns_newest_first() {
    let (app, state) = test_app().await;
    let (_, _, metric_id, device_id) = seed_fleet(&app).await;

    sample_once(&state.repos).await.unwrap();
    sample_once(&state.repos).await.unwrap();
    sample_once(&state.repos).await.unwrap();

    let (status, body) = get(
        &app,
        &format!("/api/v1/devices/{}/history/{}", device_id, metric_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["device"]["id"].as_i64().unwrap(), device_id);
    assert_eq!(body["metric"]["id"].as_i64().unwrap(), metric_id);

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 3);

    let timestamps: Vec<chrono::DateTime<chrono::Utc>> = history
        .iter()
        .map(|point| {
            serde_json::from_value(point["recorded_at"].clone()).expect("RFC3339 timestamp")
        })
        .collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn deleting_a_device_drops_its_readings() {
    let (app, state) = test_app().await;
    let (_, _, _, device_id) = seed_fleet(&app).await;

    sample_once(&state.repos).await.unwrap();
    let count = state
        .repos
        .db
        .measures()
        .count_for_device(device_id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let (status, _) = common::delete(&app, &format!("/api/v1/devices/{}", device_id)).await;
    assert_eq!(status, StatusCode::OK);

    let count = state
        .repos
        .db
        .measures()
        .count_for_device(device_id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
