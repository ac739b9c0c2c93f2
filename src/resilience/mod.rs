//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Startup, per backend:
//!     → backoff.rs (delay between connection attempts)
//!
//! Request to backend:
//!     → circuit_breaker.rs (gate: allow or fail fast)
//!     → timeouts.rs (enforce per-call deadline)
//!     → circuit_breaker.rs (record outcome)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - Requests are never retried; only connection setup retries
//! - Circuit breaker prevents cascading failures
//! - Breaker and timeout are independent and composed by the dispatcher

pub mod backoff;
pub mod circuit_breaker;
pub mod timeouts;

pub use backoff::Backoff;
pub use circuit_breaker::{BreakerSnapshot, CircuitBreaker, CircuitState, Permit};
pub use timeouts::{CallContext, TimeoutError, TimeoutGuard};
