//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

use crate::utils::format_milliseconds;

/// Requests slower than this are logged as warnings
const SLOW_REQUEST_MS: u64 = 5_000;

/// Log method, path, status and duration of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status, duration_ms = %duration_ms, "Request failed");
    } else if elapsed_ms >= SLOW_REQUEST_MS {
        warn!(
            method = %method,
            path = %path,
            status,
            elapsed = %format_milliseconds(elapsed_ms),
            "Slow request"
        );
    } else {
        info!(method = %method, path = %path, status, duration_ms = %duration_ms, "Request completed");
    }

    response
}
