//! Request logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Logs one line per request with method, path, status and latency.
/// Severity tracks the response class so failures stand out in the stream.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, path, status, latency_ms, "request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, path, status, latency_ms, "request rejected");
    } else {
        tracing::info!(%method, path, status, latency_ms, "request completed");
    }

    response
}
