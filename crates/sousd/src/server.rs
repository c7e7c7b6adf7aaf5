//! HTTP server for sousd

use crate::config::Config;
use crate::limit::RateLimiter;
use crate::routes;
use crate::suggest::SuggestEngine;
use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub engine: SuggestEngine,
    pub limiter: Option<RateLimiter>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: SuggestEngine, config: &Config) -> Self {
        let limiter = config
            .policies
            .rate_limit
            .enabled
            .then(|| RateLimiter::new(&config.policies.rate_limit));

        Self {
            engine,
            limiter,
            start_time: Instant::now(),
        }
    }
}

/// Build the router. Split out from `run` so tests can drive it
/// without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    // The browser front end is served from a different origin, so the
    // API answers preflight and allows any caller.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::suggestion_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let state = Arc::new(state);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("  Listening on http://{}", bind);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
