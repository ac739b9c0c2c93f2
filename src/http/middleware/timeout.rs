//! Inbound request timeout.
//!
//! Bounds the whole request/response. On expiry the handler future is dropped
//! and the client gets the 504 envelope.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Duration;

use crate::http::error::ApiError;

pub async fn request_timeout(State(timeout): State<Duration>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %path, timeout = ?timeout, "Request timed out");
            ApiError::timeout().into_response()
        }
    }
}
