mod api;
mod config;
mod views;

use std::sync::Arc;

use anyhow::Context;
use fileshare_index::{Index, LogProgress, ShareRoot};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{AppState, create_share_router};
use crate::config::ShareConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting fileshare server");
    let config_path = ShareConfig::config_path();
    info!(path = %config_path.display(), "loading share config");
    let config = ShareConfig::from_file(&config_path)
        .with_context(|| format!("failed to load share config from {}", config_path.display()))?;

    let root = ShareRoot::new(&config.root_dir).with_context(|| {
        format!("failed to open share root {}", config.root_dir.display())
    })?;
    info!(root = %root.path().display(), "share root ready");

    // The first build walks the whole tree; serving waits for it.
    let index = tokio::task::spawn_blocking({
        let root = root.clone();
        let index_file = config.index_file.clone();
        move || Index::load_or_build(&root, &index_file, &mut LogProgress::default())
    })
    .await
    .context("index task panicked")?
    .context("failed to prepare file index")?;
    info!(entries = index.len(), "index ready");

    let state = Arc::new(AppState::new(root, index));
    let app = create_share_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
