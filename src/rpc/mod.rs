//! Backend RPC subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     connector.rs (dial with retries) → handle.rs (owned channel + connectivity)
//!
//! Per call:
//!     user.rs / article.rs (typed unary call, messages.rs payloads)
//!     → status.rs (backend status → application code + HTTP status)
//! ```

pub mod article;
pub mod client;
pub mod connector;
pub mod handle;
pub mod messages;
pub mod status;
pub mod user;

pub use article::ArticleClient;
pub use connector::{ConnectError, Connector, Dial, TonicDialer};
pub use handle::{ConnectionHandle, Connectivity};
pub use status::{BackendError, BackendStatus};
pub use user::UserClient;
