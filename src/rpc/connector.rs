//! Backend connection establishment.
//!
//! # Responsibilities
//! - Dial a backend with a per-attempt timeout
//! - Retry failed dials with exponential backoff, a bounded number of times
//! - Report a terminal error naming the target and attempt count
//!
//! # Design Decisions
//! - The dial primitive is a trait so the retry policy is testable without sockets
//! - No circuit breaker here; gating applies to calls, not to setup
//! - Never retries indefinitely

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};

use crate::resilience::Backoff;

/// Connection setup gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to connect to {address} after {attempts} attempts: {last_error}")]
pub struct ConnectError {
    pub address: String,
    pub attempts: u32,
    pub last_error: String,
}

/// Opens one connection to an address.
pub trait Dial {
    type Conn;
    type Error: Display;

    fn dial(&self, address: &str) -> impl Future<Output = Result<Self::Conn, Self::Error>> + Send;
}

/// Dials gRPC channels over HTTP/2.
#[derive(Debug, Clone, Default)]
pub struct TonicDialer {
    /// Per-request timeout applied by the channel itself.
    pub request_timeout: Option<Duration>,
}

impl TonicDialer {
    fn endpoint(&self, address: &str) -> Result<Endpoint, tonic::transport::Error> {
        let uri = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };
        let endpoint = Endpoint::from_shared(uri)?;
        Ok(match self.request_timeout {
            Some(t) => endpoint.timeout(t),
            None => endpoint,
        })
    }
}

impl Dial for TonicDialer {
    type Conn = Channel;
    type Error = tonic::transport::Error;

    fn dial(&self, address: &str) -> impl Future<Output = Result<Channel, Self::Error>> + Send {
        let endpoint = self.endpoint(address);
        async move { endpoint?.connect().await }
    }
}

/// Retrying connection establisher.
///
/// Yields the bare connection; the caller wraps it in a
/// [`ConnectionHandle`](crate::rpc::ConnectionHandle) together with the
/// backend's name (see `Upstreams::from_channels`).
#[derive(Debug, Clone)]
pub struct Connector<D> {
    dialer: D,
    attempt_timeout: Duration,
    backoff: Backoff,
}

impl<D: Dial> Connector<D> {
    pub fn new(dialer: D, attempt_timeout: Duration, backoff: Backoff) -> Self {
        Self {
            dialer,
            attempt_timeout,
            backoff,
        }
    }

    /// Dial `address` until it succeeds or `max_attempts` dials have failed.
    pub async fn connect(&self, address: &str, max_attempts: u32) -> Result<D::Conn, ConnectError> {
        let mut last_error = String::from("no attempts made");

        for attempt in 1..=max_attempts {
            tracing::info!(
                target_addr = %address,
                attempt,
                max_attempts,
                "Connecting to backend"
            );

            match tokio::time::timeout(self.attempt_timeout, self.dialer.dial(address)).await {
                Ok(Ok(conn)) => {
                    tracing::info!(target_addr = %address, attempt, "Connected to backend");
                    return Ok(conn);
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                    tracing::warn!(target_addr = %address, attempt, error = %e, "Connection attempt failed");
                }
                Err(_) => {
                    last_error = format!("dial timed out after {:?}", self.attempt_timeout);
                    tracing::warn!(
                        target_addr = %address,
                        attempt,
                        timeout = ?self.attempt_timeout,
                        "Connection attempt timed out"
                    );
                }
            }

            if attempt < max_attempts {
                let delay = self.backoff.delay(attempt);
                tracing::info!(target_addr = %address, delay = ?delay, "Retrying connection");
                tokio::time::sleep(delay).await;
            }
        }

        Err(ConnectError {
            address: address.to_string(),
            attempts: max_attempts,
            last_error,
        })
    }
}
