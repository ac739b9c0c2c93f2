//! Backend status translation.
//!
//! # Responsibilities
//! - Map every backend RPC status to a stable application code and an HTTP status
//! - Map application codes carried in backend payloads back to HTTP statuses
//!
//! # Design Decisions
//! - One static table drives both directions
//! - Unknown statuses and codes degrade to a server error, never fail

use axum::http::StatusCode;
use thiserror::Error;

/// Application code for a successful response.
pub const CODE_OK: &str = "000";

/// Closed set of statuses a backend call can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendStatus {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

/// One row of the status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMapping {
    pub status: BackendStatus,
    pub code: &'static str,
    pub http: u16,
}

const fn row(status: BackendStatus, code: &'static str, http: u16) -> StatusMapping {
    StatusMapping { status, code, http }
}

/// The code table. Row order follows the numeric RPC code.
pub static STATUS_TABLE: [StatusMapping; 17] = [
    row(BackendStatus::Ok, "000", 200),
    row(BackendStatus::Cancelled, "001", 499),
    row(BackendStatus::Unknown, "002", 500),
    row(BackendStatus::InvalidArgument, "003", 400),
    row(BackendStatus::DeadlineExceeded, "004", 504),
    row(BackendStatus::NotFound, "005", 404),
    row(BackendStatus::AlreadyExists, "006", 409),
    row(BackendStatus::PermissionDenied, "007", 403),
    row(BackendStatus::ResourceExhausted, "008", 429),
    row(BackendStatus::FailedPrecondition, "009", 400),
    row(BackendStatus::Aborted, "010", 409),
    row(BackendStatus::OutOfRange, "011", 400),
    row(BackendStatus::Unimplemented, "012", 501),
    row(BackendStatus::Internal, "013", 500),
    row(BackendStatus::Unavailable, "014", 503),
    row(BackendStatus::DataLoss, "015", 500),
    row(BackendStatus::Unauthenticated, "016", 401),
];

impl BackendStatus {
    /// Resolve a numeric RPC code. Anything outside the table is `Unknown`.
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| STATUS_TABLE.get(idx))
            .map(|m| m.status)
            .unwrap_or(BackendStatus::Unknown)
    }

    fn mapping(self) -> &'static StatusMapping {
        STATUS_TABLE
            .iter()
            .find(|m| m.status == self)
            .unwrap_or(&STATUS_TABLE[2])
    }

    /// Application code for this status.
    pub fn app_code(self) -> &'static str {
        self.mapping().code
    }

    /// HTTP status for this status.
    pub fn http_status(self) -> StatusCode {
        http_status(self.mapping().http)
    }
}

impl From<tonic::Code> for BackendStatus {
    fn from(code: tonic::Code) -> Self {
        Self::from_code(code as i32)
    }
}

/// Translate a backend status into `(application code, HTTP status)`.
pub fn translate(status: BackendStatus) -> (&'static str, StatusCode) {
    let m = status.mapping();
    (m.code, http_status(m.http))
}

/// HTTP status for an application code found in a backend payload.
///
/// Unrecognized codes map to 500.
pub fn http_status_for_code(code: &str) -> StatusCode {
    STATUS_TABLE
        .iter()
        .find(|m| m.code == code)
        .map(|m| http_status(m.http))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// 499 is outside the IANA registry but still a valid three digit code.
fn http_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A failure reported by a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend returned {status:?}: {message}")]
pub struct BackendError {
    pub status: BackendStatus,
    pub message: String,
}

impl BackendError {
    pub fn new(status: BackendStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<tonic::Status> for BackendError {
    fn from(status: tonic::Status) -> Self {
        Self::new(status.code().into(), status.message())
    }
}
