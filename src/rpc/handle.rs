//! Connection handle owned by a backend's dispatcher.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Connectivity as last observed through calls on the channel.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connectivity {
    Ready = 0,
    TransientFailure = 1,
}

impl From<u8> for Connectivity {
    fn from(val: u8) -> Self {
        match val {
            0 => Connectivity::Ready,
            _ => Connectivity::TransientFailure,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Connectivity::Ready => "READY",
            Connectivity::TransientFailure => "TRANSIENT_FAILURE",
        })
    }
}

/// An established channel to one backend.
#[derive(Debug)]
pub struct ConnectionHandle<C> {
    name: String,
    address: String,
    conn: C,
    connectivity: AtomicU8,
}

impl<C: Clone> ConnectionHandle<C> {
    /// Wrap a freshly connected channel; it starts out ready.
    pub fn new(name: impl Into<String>, address: impl Into<String>, conn: C) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            conn,
            connectivity: AtomicU8::new(Connectivity::Ready as u8),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// A clone of the channel for one call.
    pub fn conn(&self) -> C {
        self.conn.clone()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity.load(Ordering::Relaxed).into()
    }

    pub fn is_ready(&self) -> bool {
        self.connectivity() == Connectivity::Ready
    }

    pub fn set_connectivity(&self, state: Connectivity) {
        let prev: Connectivity = self.connectivity.swap(state as u8, Ordering::Relaxed).into();
        if prev != state {
            tracing::info!(backend = %self.name, from = %prev, to = %state, "Connectivity changed");
        }
    }
}
