//! Access logging.
//!
//! Every request runs inside a `request` span tagged with a fresh UUID v4 and
//! the client address, and produces exactly one completion event. Probes that
//! hit `/v1/health` log at info; misses log at warn so scanners and
//! misconfigured health checks stand out; anything 5xx logs at error.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, Level};
use uuid::Uuid;

/// Request ID stored in request extensions.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

/// Client address, present when the router is served with connect info.
///
/// Router tests drive the service without a socket, so absence is normal.
pub fn peer_addr(request: &Request) -> Option<SocketAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// Level of the completion event for a response status.
pub fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Middleware writing one access log line per request.
///
/// Installed outermost so the span also covers the 404 fallback.
pub async fn access_log_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    request.extensions_mut().insert(RequestId(request_id));

    let peer = peer_addr(&request)
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        peer = %peer,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();

    let level = completion_level(response.status());
    span.in_scope(|| {
        if level == Level::ERROR {
            tracing::error!(status, latency_ms, "Request failed");
        } else if level == Level::WARN {
            tracing::warn!(status, latency_ms, "Request not served");
        } else {
            tracing::info!(status, latency_ms, "Request completed");
        }
    });

    response
}
