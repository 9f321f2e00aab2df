//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use trustgate_core::TrustScore;
use trustgate_engine::StoreError;

/// Non-success outcomes of an evaluation request.
///
/// A policy denial and a store outage map to different status codes so an
/// outage is never mistaken for a denial.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request scored below the trust threshold.
    #[error("access denied by policy engine")]
    Denied { score: TrustScore },

    /// The profile store could not be consulted.
    #[error("evaluation unavailable: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::Denied { score } => (
                StatusCode::FORBIDDEN,
                Json(json!({"error": self.to_string(), "score": score})),
            )
                .into_response(),
            GatewayError::Store(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": self.to_string()})),
            )
                .into_response(),
        }
    }
}
