//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::gateway::TimeoutPolicy;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The backend services fronted by the gateway.
    pub backends: BackendsConfig,

    /// Connection establishment policy at startup.
    pub connect: ConnectConfig,

    /// Circuit breaker settings, applied to every backend.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The two backend services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendsConfig {
    pub user: BackendConfig,
    pub article: BackendConfig,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            user: BackendConfig {
                name: "user_service".to_string(),
                address: "localhost:50051".to_string(),
            },
            article: BackendConfig {
                name: "article_service".to_string(),
                address: "localhost:50052".to_string(),
            },
        }
    }
}

/// One backend service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Name used in logs and the health report.
    pub name: String,

    /// Backend address (e.g., "localhost:50051" or "http://users:50051").
    pub address: String,
}

/// Connection establishment policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Dial attempts before startup gives up.
    pub max_attempts: u32,

    /// Timeout for a single dial attempt in seconds.
    pub attempt_timeout_secs: u64,

    /// Delay after the first failed attempt in milliseconds.
    pub initial_backoff_ms: u64,

    /// Upper bound for the delay between attempts in milliseconds.
    pub max_backoff_ms: u64,

    /// Randomly shorten each delay by up to 10%.
    pub jitter: bool,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            attempt_timeout_secs: 10,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
            jitter: false,
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub max_failures: u32,

    /// Seconds an open circuit waits before admitting a probe.
    ///
    /// May be shorter than `timeouts.backend_call_ms`. Calls admitted before
    /// the circuit opened only update counters; the probe alone settles it.
    pub reset_timeout_secs: u64,

    /// Whether a timed-out call counts as a failure.
    pub on_timeout: TimeoutPolicy,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            reset_timeout_secs: 30,
            on_timeout: TimeoutPolicy::CountAsFailure,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (whole request/response) in seconds.
    pub request_secs: u64,

    /// Deadline for a single backend call in milliseconds.
    /// Must be shorter than the request timeout.
    pub backend_call_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 5,
            backend_call_ms: 4_500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
