//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds > 0, timeouts ordered, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{BackendConfig, GatewayConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    check_backend("backends.user", &config.backends.user, &mut errors);
    check_backend("backends.article", &config.backends.article, &mut errors);
    if config.backends.user.name == config.backends.article.name {
        errors.push(ValidationError::new("backends", "backend names must be distinct"));
    }

    let connect = &config.connect;
    if connect.max_attempts == 0 {
        errors.push(ValidationError::new("connect.max_attempts", "must be at least 1"));
    }
    if connect.attempt_timeout_secs == 0 {
        errors.push(ValidationError::new("connect.attempt_timeout_secs", "must be positive"));
    }
    if connect.initial_backoff_ms > connect.max_backoff_ms {
        errors.push(ValidationError::new(
            "connect.initial_backoff_ms",
            "must not exceed connect.max_backoff_ms",
        ));
    }

    if config.circuit_breaker.max_failures == 0 {
        errors.push(ValidationError::new("circuit_breaker.max_failures", "must be at least 1"));
    }
    if config.circuit_breaker.reset_timeout_secs == 0 {
        errors.push(ValidationError::new("circuit_breaker.reset_timeout_secs", "must be positive"));
    }

    let timeouts = &config.timeouts;
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be positive"));
    }
    if timeouts.backend_call_ms == 0 {
        errors.push(ValidationError::new("timeouts.backend_call_ms", "must be positive"));
    } else if timeouts.backend_call_ms >= timeouts.request_secs.saturating_mul(1000) {
        errors.push(ValidationError::new(
            "timeouts.backend_call_ms",
            "must be shorter than timeouts.request_secs",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_backend(field: &str, backend: &BackendConfig, errors: &mut Vec<ValidationError>) {
    if backend.name.trim().is_empty() {
        errors.push(ValidationError::new(format!("{}.name", field), "must not be empty"));
    }
    if backend.address.trim().is_empty() {
        errors.push(ValidationError::new(format!("{}.address", field), "must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.circuit_breaker.max_failures = 0;
        config.connect.max_attempts = 0;
        config.backends.article.address = String::new();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "backends.article.address",
                "connect.max_attempts",
                "circuit_breaker.max_failures",
            ]
        );
    }

    #[test]
    fn test_backend_deadline_must_fit_request_timeout() {
        let mut config = GatewayConfig::default();
        config.timeouts.backend_call_ms = 5_000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "timeouts.backend_call_ms");
        assert!(errors[0].to_string().contains("shorter than"));
    }

    #[test]
    fn test_reset_timeout_may_be_shorter_than_backend_deadline() {
        let mut config = GatewayConfig::default();
        config.circuit_breaker.reset_timeout_secs = 1;
        config.timeouts.backend_call_ms = 4_500;
        assert_eq!(validate_config(&config), Ok(()));
    }
}
