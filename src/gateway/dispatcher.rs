//! Per-backend call dispatch.
//!
//! # Responsibilities
//! - Gate every outbound call through the backend's circuit breaker
//! - Run the call under the per-call timeout guard
//! - Feed the outcome back to the breaker and the connection handle
//!
//! # Design Decisions
//! - A rejected gate makes zero outbound attempts
//! - Whether a timeout counts as a breaker failure is policy, not hardcoded
//! - An admitted call that is dropped mid-flight still frees the probe slot
//! - Only the Half-Open probe settles the circuit; older calls just count

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::health::ServiceHealth;
use crate::resilience::{CallContext, CircuitBreaker, Permit, TimeoutError, TimeoutGuard};
use crate::rpc::{BackendError, BackendStatus, ConnectionHandle, Connectivity};

/// Why a dispatched call produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The breaker refused the call; nothing was sent.
    #[error("circuit breaker for {backend} is open")]
    CircuitOpen { backend: String },

    /// The call ran past its deadline.
    #[error("{backend} did not respond within {timeout:?}")]
    Timeout { backend: String, timeout: Duration },

    /// The backend answered with a failure status.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// How a timed-out call is reported to the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Record the timeout as a failure.
    #[default]
    CountAsFailure,
    /// Leave the counters alone.
    Ignore,
}

/// Outcome slot for a call the breaker admitted.
struct Admission<'a> {
    breaker: &'a CircuitBreaker,
    permit: Option<Permit>,
}

impl<'a> Admission<'a> {
    fn new(breaker: &'a CircuitBreaker, permit: Permit) -> Self {
        Self {
            breaker,
            permit: Some(permit),
        }
    }

    fn record(mut self, success: bool) {
        if let Some(permit) = self.permit.take() {
            self.breaker.record_outcome(permit, success);
        }
    }

    fn release(mut self) {
        if let Some(permit) = self.permit.take() {
            self.breaker.release(permit);
        }
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if let Some(permit) = self.permit.take() {
            self.breaker.release(permit);
        }
    }
}

/// Owns one backend's connection and guards every call made on it.
#[derive(Debug)]
pub struct Dispatcher<C> {
    handle: ConnectionHandle<C>,
    breaker: Arc<CircuitBreaker>,
    guard: TimeoutGuard,
    timeout_policy: TimeoutPolicy,
}

impl<C: Clone> Dispatcher<C> {
    pub fn new(
        handle: ConnectionHandle<C>,
        breaker: Arc<CircuitBreaker>,
        guard: TimeoutGuard,
        timeout_policy: TimeoutPolicy,
    ) -> Self {
        Self {
            handle,
            breaker,
            guard,
            timeout_policy,
        }
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    pub fn handle(&self) -> &ConnectionHandle<C> {
        &self.handle
    }

    pub fn health(&self) -> ServiceHealth {
        ServiceHealth::observe(self.handle.connectivity(), self.breaker.snapshot())
    }

    /// Invoke `op` on this backend's connection, guarded by breaker and deadline.
    pub async fn call<T, E, F, Fut>(&self, op: F) -> Result<T, DispatchError>
    where
        F: FnOnce(C, CallContext) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<BackendError>,
    {
        let Some(permit) = self.breaker.allow() else {
            tracing::warn!(backend = %self.name(), "Circuit open, rejecting call");
            return Err(DispatchError::CircuitOpen {
                backend: self.name().to_string(),
            });
        };

        let admission = Admission::new(&self.breaker, permit);
        let conn = self.handle.conn();
        tracing::debug!(backend = %self.name(), timeout = ?self.guard.timeout(), "Dispatching call");

        match self.guard.run(|ctx| op(conn, ctx)).await {
            Ok(Ok(value)) => {
                admission.record(true);
                self.handle.set_connectivity(Connectivity::Ready);
                Ok(value)
            }
            Ok(Err(e)) => {
                let err: BackendError = e.into();
                admission.record(false);
                self.handle.set_connectivity(if err.status == BackendStatus::Unavailable {
                    Connectivity::TransientFailure
                } else {
                    Connectivity::Ready
                });
                tracing::warn!(
                    backend = %self.name(),
                    status = ?err.status,
                    error = %err.message,
                    "Backend call failed"
                );
                Err(DispatchError::Backend(err))
            }
            Err(TimeoutError(timeout)) => {
                match self.timeout_policy {
                    TimeoutPolicy::CountAsFailure => admission.record(false),
                    TimeoutPolicy::Ignore => admission.release(),
                }
                tracing::warn!(backend = %self.name(), timeout = ?timeout, "Backend call timed out");
                Err(DispatchError::Timeout {
                    backend: self.name().to_string(),
                    timeout,
                })
            }
        }
    }
}
