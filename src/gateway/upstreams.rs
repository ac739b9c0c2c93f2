//! The two backends the gateway fronts.

use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Channel;

use crate::config::GatewayConfig;
use crate::gateway::dispatcher::Dispatcher;
use crate::resilience::{CircuitBreaker, TimeoutGuard};
use crate::rpc::{ArticleClient, ConnectionHandle, UserClient};

pub type UserDispatcher = Dispatcher<UserClient>;
pub type ArticleDispatcher = Dispatcher<ArticleClient>;

/// Dispatchers for every backend, shared by all request handlers.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub users: Arc<UserDispatcher>,
    pub articles: Arc<ArticleDispatcher>,
}

impl Upstreams {
    /// Wire already-connected channels into guarded dispatchers.
    pub fn from_channels(config: &GatewayConfig, users: Channel, articles: Channel) -> Self {
        let user_cfg = &config.backends.user;
        let article_cfg = &config.backends.article;

        Self {
            users: Arc::new(dispatcher(
                config,
                ConnectionHandle::new(&user_cfg.name, &user_cfg.address, UserClient::new(users)),
            )),
            articles: Arc::new(dispatcher(
                config,
                ConnectionHandle::new(&article_cfg.name, &article_cfg.address, ArticleClient::new(articles)),
            )),
        }
    }
}

fn dispatcher<C: Clone>(config: &GatewayConfig, handle: ConnectionHandle<C>) -> Dispatcher<C> {
    let cb = &config.circuit_breaker;
    let breaker = Arc::new(CircuitBreaker::new(
        handle.name(),
        cb.max_failures,
        Duration::from_secs(cb.reset_timeout_secs),
    ));
    tracing::info!(
        backend = %handle.name(),
        max_failures = cb.max_failures,
        reset_timeout_secs = cb.reset_timeout_secs,
        "Circuit breaker initialized"
    );

    let guard = TimeoutGuard::new(Duration::from_millis(config.timeouts.backend_call_ms));

    Dispatcher::new(handle, breaker, guard, cb.on_timeout)
}
