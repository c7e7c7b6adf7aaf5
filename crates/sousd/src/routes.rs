//! API routes for sousd

use crate::server::AppState;
use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use sous_common::{ErrorBody, HealthResponse, SuggestError, SuggestionResponse};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Suggestion Routes
// ============================================================================

pub fn suggestion_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/suggestions", post(create_suggestions))
}

async fn create_suggestions(
    State(state): State<AppStateArc>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Option<Json<Value>>,
) -> Result<Json<SuggestionResponse>, (StatusCode, Json<ErrorBody>)> {
    if let Some(limiter) = &state.limiter {
        let peer = peer
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        if !limiter.check(&peer).await {
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorBody::new("Too many requests")),
            ));
        }
    }

    // Read the prompt leniently: an absent field, a non-string value,
    // or a non-JSON body all fall through to the engine's
    // empty-prompt rejection, so the caller still gets a JSON error.
    let prompt = body
        .as_ref()
        .and_then(|Json(v)| v.get("prompt"))
        .and_then(|p| p.as_str())
        .unwrap_or("");

    info!("[Q]  Suggesting for prompt ({} chars)", prompt.len());

    match state.engine.generate(prompt).await {
        Ok(response) => {
            info!("[A]  {} suggestions", response.suggestions.len());
            Ok(Json(response))
        }
        Err(e) => {
            error!("[E]  {}", e);
            Err(error_reply(e))
        }
    }
}

fn error_reply(e: SuggestError) -> (StatusCode, Json<ErrorBody>) {
    let status =
        StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match e.details() {
        Some(details) => ErrorBody::with_details(e.to_string(), details),
        None => ErrorBody::new(e.to_string()),
    };
    (status, Json(body))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        upstream: state.engine.upstream_kind().to_string(),
    })
}
