//! Resilient API gateway.
//!
//! Fronts a user service and an article service (gRPC) with an HTTP/JSON API,
//! guarding every backend call with a circuit breaker and a deadline.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http (router, middleware, handlers)
//!                         │
//!                         ▼
//!                     gateway::Dispatcher ── resilience::CircuitBreaker (gate / record)
//!                         │              └── resilience::TimeoutGuard (deadline)
//!                         ▼
//!                     rpc (channel from Connector, unary call)
//!                         │
//!     Client Response     ▼
//!     ◀────────────── rpc::status (backend status → code + HTTP status) ── envelope
//!
//!     Cross-cutting: config, health, lifecycle, observability
//! ```

// Core subsystems
pub mod config;
pub mod gateway;
pub mod http;
pub mod rpc;

// Cross-cutting concerns
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use gateway::{Dispatcher, Upstreams};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
