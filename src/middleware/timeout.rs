//! Request timeout middleware
//!
//! Answers with the error envelope when a handler overruns its deadline.
//! The handler future is dropped; sandbox backends clean up on drop.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Request timeout middleware; the state is the deadline
pub async fn timeout_middleware(
    State(limit): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                limit_ms = limit.as_millis() as u64,
                "Request timed out"
            );
            Err(AppError::RequestTimeout)
        }
    }
}
