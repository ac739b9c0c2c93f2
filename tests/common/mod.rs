//! Shared utilities for integration tests.

#![allow(dead_code)]

use api_gateway::config::GatewayConfig;
use api_gateway::gateway::Upstreams;
use api_gateway::http::{build_router, AppState};
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tonic::transport::{Channel, Endpoint};
use tower::ServiceExt;

/// Gateway config with short deadlines suitable for tests.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.timeouts.request_secs = 2;
    config.timeouts.backend_call_ms = 500;
    config
}

/// A channel whose every call fails to connect.
pub fn unreachable_channel() -> Channel {
    Endpoint::from_static("http://127.0.0.1:1").connect_lazy()
}

/// A channel to a listener that accepts connections and never answers.
pub async fn blackhole_channel() -> Channel {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    Endpoint::from_shared(format!("http://{}", addr))
        .unwrap()
        .connect_lazy()
}

pub fn upstreams(config: &GatewayConfig, users: Channel, articles: Channel) -> Upstreams {
    Upstreams::from_channels(config, users, articles)
}

pub fn router(config: &GatewayConfig, upstreams: Upstreams) -> Router {
    build_router(
        AppState::new(upstreams),
        Duration::from_secs(config.timeouts.request_secs),
    )
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Serve the gateway on an ephemeral port until the returned sender fires.
pub async fn spawn_gateway(
    config: &GatewayConfig,
    upstreams: Upstreams,
) -> (SocketAddr, api_gateway::lifecycle::Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = api_gateway::lifecycle::Shutdown::new();
    let server = api_gateway::http::HttpServer::new(config, upstreams);
    let signal = shutdown.signalled();

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
