//! HTTP routes.
//!
//! Only the liveness endpoint is registered. Everything else, including a
//! known path requested with the wrong method, gets the same plain-text 404.
//!
//! Every request, matched or not, passes through the access log middleware.

pub mod health;

use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_HEALTH, HEALTH_PATH};
use crate::error::AppError;
use crate::middleware::access_log_layer;

/// Fallback for unmatched paths and methods.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Creates the Axum router with the health route and 404 fallbacks.
pub fn create_router() -> Router {
    // Health check - never cached, always fresh for liveness probes
    let health_routes = Router::new()
        .route(HEALTH_PATH, get(health::health))
        .method_not_allowed_fallback(not_found)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .fallback(not_found)
        // Access log - root span with request_id and peer for every request
        .layer(middleware::from_fn(access_log_layer))
}
