use anyhow::Result;
use axum::Router;
use device_monitor::{api, config::Config, sampler, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let app_state = sampler::AppState::new(cfg.clone()).await?;

    let app: Router = api::router(app_state.clone(), &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!(
            "server binding to 0.0.0.0 - service will be accessible from the network; \
            bind to 127.0.0.1 unless behind a firewall/reverse proxy"
        );
    }

    info!(%addr, "starting Device Monitoring API");

    sampler::spawn_sampler_task(app_state.clone(), cfg.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
