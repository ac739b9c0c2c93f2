//! Failure injection tests against a live gateway.

use api_gateway::gateway::TimeoutPolicy;
use serde_json::Value;
use std::time::{Duration, Instant};

mod common;
use common::{blackhole_channel, http_client, spawn_gateway, test_config, unreachable_channel, upstreams};

#[tokio::test]
async fn test_hung_backend_times_out_and_counts() {
    let config = test_config();
    let ups = upstreams(&config, blackhole_channel().await, unreachable_channel());
    let (addr, shutdown) = spawn_gateway(&config, ups).await;
    let client = http_client();

    let started = Instant::now();
    let res = client
        .get(format!("http://{}/api/v1/users/1", addr))
        .send()
        .await
        .expect("gateway unreachable");
    let elapsed = started.elapsed();

    assert_eq!(res.status(), 504);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "504");
    assert_eq!(body["message"], "request timeout: service took too long to respond");
    assert!(elapsed >= Duration::from_millis(500), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "inbound timeout should not be reached: {elapsed:?}");

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["services"]["user_service"]["failures"], 1);
    assert_eq!(health["services"]["user_service"]["circuit"], "CLOSED");

    shutdown.trigger();
}

#[tokio::test]
async fn test_ignored_timeouts_leave_breaker_alone() {
    let mut config = test_config();
    config.circuit_breaker.on_timeout = TimeoutPolicy::Ignore;
    let ups = upstreams(&config, unreachable_channel(), blackhole_channel().await);
    let (addr, shutdown) = spawn_gateway(&config, ups).await;
    let client = http_client();

    let res = client
        .get(format!("http://{}/api/v1/articles/1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 504);

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["services"]["article_service"]["failures"], 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_open_circuit_rejects_fast() {
    let mut config = test_config();
    config.circuit_breaker.max_failures = 1;
    let ups = upstreams(&config, blackhole_channel().await, unreachable_channel());
    let (addr, shutdown) = spawn_gateway(&config, ups).await;
    let client = http_client();
    let url = format!("http://{}/api/v1/users", addr);

    // One timeout opens the circuit.
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 504);

    let started = Instant::now();
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 503);
    assert!(started.elapsed() < Duration::from_millis(400), "rejection must not wait on the backend");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "014");

    let res = client.get(format!("http://{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), 503);
    let health: Value = res.json().await.unwrap();
    assert_eq!(health["status"], "degraded");

    shutdown.trigger();
}
