use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tracing::{error, info};

use trend_server::{api, config, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let (cfg, cfg_path) = config::Config::load().context("loading config/trendscope.toml")?;
    info!(?cfg_path, "config loaded");

    let addr: SocketAddr = cfg.bind().parse().context("invalid bind address")?;
    let state = api::AppState::new(cfg)?;
    let router: Router = api::build_router(state);

    info!(%addr, version = env!("CARGO_PKG_VERSION"), "trend_server listening");

    let server = axum::serve(tokio::net::TcpListener::bind(addr).await?, router);

    let graceful = server.with_graceful_shutdown(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received; shutting down");
    });

    if let Err(e) = graceful.await {
        error!(error = %e, "server error");
    }

    Ok(())
}
