//! Startup orchestration.
//!
//! # Responsibilities
//! - Connect every backend with the configured retry policy
//! - Wrap the channels in guarded dispatchers
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: a backend that never connects aborts startup
//! - Backends connect in order, not concurrently
//! - The listener binds last (traffic only when ready)

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tonic::transport::Channel;

use crate::config::{BackendConfig, ConnectConfig, GatewayConfig};
use crate::gateway::Upstreams;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::resilience::Backoff;
use crate::rpc::{ConnectError, Connector, TonicDialer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("backend {backend} unreachable: {source}")]
    Connect {
        backend: String,
        #[source]
        source: ConnectError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// The connector described by the `[connect]` section.
pub fn connector(config: &ConnectConfig) -> Connector<TonicDialer> {
    let backoff = Backoff::new(
        Duration::from_millis(config.initial_backoff_ms),
        Duration::from_millis(config.max_backoff_ms),
    )
    .with_jitter(config.jitter);
    Connector::new(
        TonicDialer::default(),
        Duration::from_secs(config.attempt_timeout_secs),
        backoff,
    )
}

/// Connect both backends and build their dispatchers.
pub async fn connect_upstreams(config: &GatewayConfig) -> Result<Upstreams, StartupError> {
    let connector = connector(&config.connect);
    let users = connect_backend(&connector, &config.backends.user, config.connect.max_attempts).await?;
    let articles = connect_backend(&connector, &config.backends.article, config.connect.max_attempts).await?;
    Ok(Upstreams::from_channels(config, users, articles))
}

async fn connect_backend(
    connector: &Connector<TonicDialer>,
    backend: &BackendConfig,
    max_attempts: u32,
) -> Result<Channel, StartupError> {
    tracing::info!(backend = %backend.name, address = %backend.address, "Connecting backend");
    let channel = connector
        .connect(&backend.address, max_attempts)
        .await
        .map_err(|source| StartupError::Connect {
            backend: backend.name.clone(),
            source,
        })?;
    tracing::info!(backend = %backend.name, "Backend connected");
    Ok(channel)
}

pub async fn bind(config: &GatewayConfig) -> Result<TcpListener, StartupError> {
    let address = config.listener.bind_address.clone();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Full gateway run: connect, bind, serve until a stop signal.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    let upstreams = connect_upstreams(&config).await?;
    let listener = bind(&config).await?;
    tracing::info!(
        address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        backend_call_ms = config.timeouts.backend_call_ms,
        "Gateway ready"
    );

    let shutdown = Arc::new(Shutdown::new());
    let signals = spawn_signal_listener(shutdown.clone());

    HttpServer::new(&config, upstreams)
        .run(listener, shutdown.signalled())
        .await?;

    signals.abort();
    Ok(())
}
