//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap backend calls with a hard deadline
//! - Hand the deadline and a cancellation signal to the wrapped call
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - The timed-out future is dropped, so abandoned work does not linger

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;

/// The call did not finish before its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// Per-call deadline and cancellation signal.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Instant,
    cancelled: watch::Receiver<bool>,
}

impl CallContext {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline (zero once it has passed).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the guard gives up on this call.
    pub async fn cancelled(&mut self) {
        while !*self.cancelled.borrow() {
            // A dropped sender means the guard is gone, which is also a cancellation.
            if self.cancelled.changed().await.is_err() {
                return;
            }
        }
    }

    /// Wrap a message in an RPC request that carries the remaining deadline.
    pub fn request<M>(&self, message: M) -> tonic::Request<M> {
        let mut request = tonic::Request::new(message);
        request.set_timeout(self.remaining());
        request
    }
}

/// Races a call against a fixed deadline.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutGuard {
    timeout: Duration,
}

impl TimeoutGuard {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `op` with a deadline of now + the guard's timeout.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, TimeoutError>
    where
        F: FnOnce(CallContext) -> Fut,
        Fut: Future<Output = T>,
    {
        self.run_until(Instant::now() + self.timeout, op).await
    }

    /// Run `op` until `deadline`.
    pub async fn run_until<T, F, Fut>(&self, deadline: Instant, op: F) -> Result<T, TimeoutError>
    where
        F: FnOnce(CallContext) -> Fut,
        Fut: Future<Output = T>,
    {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = CallContext {
            deadline,
            cancelled: cancel_rx,
        };

        match tokio::time::timeout_at(deadline, op(ctx)).await {
            Ok(value) => Ok(value),
            Err(_) => {
                let _ = cancel_tx.send(true);
                Err(TimeoutError(self.timeout))
            }
        }
    }
}
