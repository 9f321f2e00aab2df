//! Axum route handlers for the trustgate gateway API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use trustgate_core::{AccessRequest, TrustScore};
use trustgate_engine::{Clock, ProfileStore, TrustEvaluator};
use uuid::Uuid;

use crate::error::GatewayError;

// ── Shared state ─────────────────────────────────────────────────────────────

/// Any profile store, shared between the evaluator and provisioning code.
pub type SharedStore = Arc<dyn ProfileStore>;

/// Any clock.
pub type SharedClock = Arc<dyn Clock>;

/// The evaluator the gateway serves.
pub type SharedEvaluator = Arc<TrustEvaluator<SharedStore, SharedClock>>;

// ── Request / response types ──────────────────────────────────────────────────

/// Header carrying the caller's network address.
pub const CLIENT_IP_HEADER: &str = "x-real-ip";
/// Header carrying the resource the caller is trying to reach.
pub const TARGET_URL_HEADER: &str = "x-target-url";
/// Header carrying the caller's device id.
pub const DEVICE_ID_HEADER: &str = "x-device-id";
/// Header carrying the caller's client id.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Body returned when a request is allowed.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub status: &'static str,
    pub score: TrustScore,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given evaluator.
pub fn create_router(evaluator: SharedEvaluator) -> Router {
    Router::new()
        .route("/evaluate", get(evaluate))
        .route("/health", get(health))
        .with_state(evaluator)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /evaluate`: score the forwarded request and allow or deny it.
///
/// Header values are opaque UTF-8; bytes that are not valid UTF-8 are
/// replaced rather than dropped. Missing headers are read as empty strings,
/// which never match a profile. A missing client id makes the caller an
/// unknown client.
///
/// # Errors
/// Returns [`GatewayError::Denied`] (403) if the score is below the trust
/// threshold, or [`GatewayError::Store`] (503) if the profile store cannot be
/// consulted.
pub async fn evaluate(
    State(evaluator): State<SharedEvaluator>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let request = access_request(&headers);
    let span = tracing::info_span!(
        "evaluate",
        request_id = %Uuid::new_v4(),
        client = %request.client_id,
    );

    let decision = evaluator.evaluate(&request).instrument(span).await?;
    if !decision.allowed {
        return Err(GatewayError::Denied { score: decision.score });
    }
    Ok(Json(EvaluateResponse { status: "success", score: decision.score }))
}

// ── Header extraction ─────────────────────────────────────────────────────────

fn access_request(headers: &HeaderMap) -> AccessRequest {
    AccessRequest::new(
        header(headers, CLIENT_ID_HEADER),
        header(headers, CLIENT_IP_HEADER),
        header(headers, TARGET_URL_HEADER),
        header(headers, DEVICE_ID_HEADER),
    )
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}
