pub mod source;

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::repo::Repositories;

/// Shared application state handed to every request handler and to the
/// background sampler.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub repos: Arc<Repositories>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let repos = Arc::new(Repositories::new(&cfg).await?);
        Ok(Self { cfg, repos })
    }

    pub fn from_repos(cfg: Config, repos: Arc<Repositories>) -> Self {
        Self { cfg, repos }
    }
}

/// Spawn the periodic sampling loop. Cycle failures are logged and the loop
/// keeps running.
pub fn spawn_sampler_task(state: AppState, cfg: Config) {
    if !cfg.sampler.enabled {
        info!("sampler disabled by configuration");
        return;
    }

    let interval = Duration::from_secs(cfg.sampler.interval_seconds.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match sample_once(&state.repos).await {
                Ok(recorded) => debug!(recorded, "sampling cycle complete"),
                Err(e) => warn!(error = %e, "sampling cycle failed"),
            }
        }
    });
}

/// Run one sampling cycle: record a reading for every metric permitted by the
/// device type of every active device. Returns the number of readings
/// recorded. Metrics naming an unknown source are skipped, not fatal.
pub async fn sample_once(repos: &Repositories) -> Result<usize> {
    let devices = repos.db.devices().list_active().await?;
    let device_types = repos.db.device_types();
    let measures = repos.db.measures();

    let mut recorded = 0;
    for device in &devices {
        let metrics = device_types.metrics_for_type(device.device_type_id).await?;
        for metric in &metrics {
            let Some(src) = source::resolve(&metric.sampler) else {
                warn!(
                    metric = %metric.name,
                    sampler = %metric.sampler,
                    "unknown reading source, skipping metric"
                );
                continue;
            };

            let value = src.sample(metric, device);
            measures
                .insert(device.id, metric.id, value, Utc::now())
                .await?;
            recorded += 1;
        }
    }

    if recorded > 0 {
        info!(devices = devices.len(), recorded, "recorded readings");
    }
    Ok(recorded)
}
