//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → middleware/timeout.rs (inbound deadline)
//!     → handlers/* (extract.rs parses input)
//!     → forward.rs (dispatcher call, payload code check, views.rs rendering)
//!     → response.rs / error.rs (envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod forward;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::{ApiResponse, ListData};
pub use server::{build_router, AppState, HttpServer};
