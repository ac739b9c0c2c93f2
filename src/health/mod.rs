//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → each dispatcher: connectivity + breaker snapshot
//!     → state.rs (ServiceHealth per backend)
//!     → report.rs (aggregate healthy / degraded)
//!     → 200 or 503 with the report as JSON
//! ```
//!
//! # Design Decisions
//! - Health is derived on demand; no background probing
//! - A backend is healthy only when its channel is READY and its circuit is not OPEN
//! - Observing health never mutates breaker or connection state

pub mod report;
pub mod state;

pub use report::{HealthReport, OverallStatus};
pub use state::ServiceHealth;
