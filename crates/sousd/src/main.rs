//! Sous Daemon - recipe suggestion proxy.

use anyhow::{Context, Result};
use sousd::config::{api_key_from_env, Config};
use sousd::server::{self, AppState};
use sousd::suggest::SuggestEngine;
use sousd::upstream::UpstreamClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("sousd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    // Fail fast: the daemon does not start without the upstream
    // credential, so routes never have to check it.
    let api_key = api_key_from_env().context("upstream credential missing")?;

    info!(
        "Upstream: {} ({}, model {})",
        config.upstream.kind, config.upstream.base_url, config.upstream.model
    );

    let upstream = UpstreamClient::new(config.upstream.clone(), api_key)
        .context("failed to build upstream client")?;
    let engine = SuggestEngine::new(upstream, config.policies.clone());
    let state = AppState::new(engine, &config);

    server::run(state, &config.server.bind).await
}
