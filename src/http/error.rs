//! Error responses.
//!
//! Every failure leaves the gateway as the same envelope as a success, with the
//! application code and HTTP status taken from the status table.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

use crate::gateway::DispatchError;
use crate::http::response::ApiResponse;
use crate::rpc::status::{http_status_for_code, translate};
use crate::rpc::BackendStatus;

/// Code and message used when the inbound or backend deadline passes.
pub const TIMEOUT_CODE: &str = "504";
pub const TIMEOUT_MESSAGE: &str = "request timeout: service took too long to respond";

/// An error rendered as an envelope without `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    fn from_status(status: BackendStatus, message: impl Into<String>) -> Self {
        let (code, http) = translate(status);
        Self::new(http, code, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::InvalidArgument, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::Unauthenticated, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::PermissionDenied, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::from_status(BackendStatus::Internal, message)
    }

    pub fn timeout() -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_CODE, TIMEOUT_MESSAGE)
    }

    /// A non-success code reported inside a backend payload.
    pub fn application(code: &str, message: impl Into<String>) -> Self {
        Self::new(http_status_for_code(code), code, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::CircuitOpen { backend } => Self::service_unavailable(format!(
                "service unavailable: circuit breaker for {} is open",
                backend
            )),
            DispatchError::Timeout { .. } => Self::timeout(),
            DispatchError::Backend(e) => Self::from_status(e.status, e.message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse = ApiResponse {
            code: self.code,
            message: self.message,
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::BackendError;
    use std::time::Duration;

    #[test]
    fn test_direct_constructors() {
        assert_eq!(ApiError::bad_request("x").code, "003");
        assert_eq!(ApiError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::unauthorized("x").code, "016");
        assert_eq!(ApiError::forbidden("x").code, "007");
        assert_eq!(ApiError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::service_unavailable("x").code, "014");
        assert_eq!(ApiError::internal("x").status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_application_code_uses_table() {
        let err = ApiError::application("006", "email already exists");
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "006");

        let err = ApiError::application("042", "mystery");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "042");
    }

    #[test]
    fn test_from_dispatch_error() {
        let open: ApiError = DispatchError::CircuitOpen {
            backend: "user_service".into(),
        }
        .into();
        assert_eq!(open.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(open.code, "014");
        assert!(open.message.contains("user_service"));

        let timeout: ApiError = DispatchError::Timeout {
            backend: "user_service".into(),
            timeout: Duration::from_millis(4500),
        }
        .into();
        assert_eq!(timeout, ApiError::timeout());

        let backend: ApiError =
            DispatchError::Backend(BackendError::new(BackendStatus::ResourceExhausted, "slow down")).into();
        assert_eq!(backend.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(backend.code, "008");
        assert_eq!(backend.message, "slow down");
    }
}
