//! Health check endpoint for container orchestration.
//!
//! Load balancer target groups probe `GET /v1/health` and treat any 200 as
//! alive. The body is fixed and the handler touches no state, so concurrent
//! probes cannot observe different answers.

use axum::Json;
use serde::Serialize;

use crate::config::HEALTH_MESSAGE;

/// Liveness payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
    })
}
