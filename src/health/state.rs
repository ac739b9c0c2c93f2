//! Per-backend health view.
//!
//! # States
//! - Healthy: channel READY and circuit CLOSED or HALF_OPEN
//! - Unhealthy: channel TRANSIENT_FAILURE, or circuit OPEN

use serde::Serialize;

use crate::resilience::{BreakerSnapshot, CircuitState};
use crate::rpc::Connectivity;

/// What `/health` reports for one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    /// Connection readiness (`READY` / `TRANSIENT_FAILURE`).
    pub status: Connectivity,
    pub healthy: bool,
    pub circuit: CircuitState,
    pub failures: u32,
}

impl ServiceHealth {
    pub fn observe(connectivity: Connectivity, breaker: BreakerSnapshot) -> Self {
        Self {
            status: connectivity,
            healthy: connectivity == Connectivity::Ready && breaker.state != CircuitState::Open,
            circuit: breaker.state,
            failures: breaker.failures,
        }
    }
}
