//! Gateway composition.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → dispatcher.rs (breaker gate → timeout guard → record outcome)
//!     → rpc client call on the backend's channel
//! ```
//!
//! # Design Decisions
//! - One dispatcher per backend, each owning its own breaker and channel
//! - Breakers are plain values held by the dispatcher, never globals

pub mod dispatcher;
pub mod upstreams;

pub use dispatcher::{DispatchError, Dispatcher, TimeoutPolicy};
pub use upstreams::{ArticleDispatcher, UserDispatcher, Upstreams};
