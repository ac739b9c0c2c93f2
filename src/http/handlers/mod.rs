//! Route handlers.

pub mod articles;
pub mod health;
pub mod users;
