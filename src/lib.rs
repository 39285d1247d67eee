//! Pulse - HTTP liveness service
//!
//! Serves `GET /v1/health` with a fixed JSON payload for load balancer and
//! orchestrator health checks.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use error::AppError;
