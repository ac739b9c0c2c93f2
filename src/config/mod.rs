//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (USER_SERVICE_ADDR, ARTICLE_SERVICE_ADDR, GATEWAY_PORT)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → read once by startup to build listeners and dispatchers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use schema::{
    BackendConfig, BackendsConfig, CircuitBreakerConfig, ConnectConfig, GatewayConfig, ListenerConfig,
    ObservabilityConfig, TimeoutConfig,
};
pub use validation::ValidationError;
