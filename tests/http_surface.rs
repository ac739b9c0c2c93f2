//! Router-level tests: input validation, envelopes, middleware.

use api_gateway::gateway::TimeoutPolicy;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;
use common::{get, json, router, send, test_config, unreachable_channel, upstreams};

fn app() -> axum::Router {
    let config = test_config();
    let ups = upstreams(&config, unreachable_channel(), unreachable_channel());
    router(&config, ups)
}

#[tokio::test]
async fn test_invalid_ids_rejected_without_backend_call() {
    let app = app();

    let (status, _, body) = send(&app, get("/api/v1/users/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"code": "003", "message": "invalid user id"}));

    let (status, _, body) = send(&app, get("/api/v1/articles/12x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid article id");

    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["user_service"]["failures"], 0);
    assert_eq!(body["services"]["article_service"]["failures"], 0);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = app();
    for (method, uri) in [
        ("POST", "/users"),
        ("POST", "/api/v1/users"),
        ("PUT", "/api/v1/users/1"),
        ("POST", "/api/v1/auth/login"),
        ("POST", "/api/v1/auth/refresh"),
        ("POST", "/api/v1/auth/validate"),
        ("POST", "/api/v1/auth/logout"),
        ("PUT", "/api/v1/articles/1"),
    ] {
        let (status, _, body) = send(&app, json(method, uri, "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body, json!({"code": "003", "message": "invalid request body"}));
    }
}

#[tokio::test]
async fn test_create_article_requires_bearer_token() {
    let app = app();
    let payload = r#"{"title":"t","content":"c","user_id":1}"#;

    let (status, _, body) = send(&app, json("POST", "/api/v1/articles", payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"code": "016", "message": "authorization token required"}));

    let request = Request::builder()
        .method("POST")
        .uri("/articles")
        .header("content-type", "application/json")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::from(payload))
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "016");
}

#[tokio::test]
async fn test_health_reports_every_backend() {
    let (status, _, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "services": {
                "user_service": {"status": "READY", "healthy": true, "circuit": "CLOSED", "failures": 0},
                "article_service": {"status": "READY", "healthy": true, "circuit": "CLOSED", "failures": 0}
            }
        })
    );
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let app = app();

    let (_, headers, _) = send(&app, get("/health")).await;
    let id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-chosen-id")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&app, request).await;
    assert_eq!(headers.get("x-request-id").unwrap(), "client-chosen-id");
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/articles")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    let methods = headers.get("access-control-allow-methods").unwrap().to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{methods} missing {method}");
    }
}

#[tokio::test]
async fn test_breaker_trips_after_consecutive_failures() {
    let config = test_config();
    let app = router(&config, upstreams(&config, unreachable_channel(), unreachable_channel()));

    for _ in 0..config.circuit_breaker.max_failures {
        let (status, _, body) = send(&app, get("/api/v1/users/1")).await;
        assert!(status.is_server_error(), "unexpected {status}");
        assert_ne!(body["code"], "000");
    }

    let (status, _, body) = send(&app, get("/api/v1/users/1")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "014");
    assert!(body["message"].as_str().unwrap().contains("circuit breaker"));

    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["user_service"]["circuit"], "OPEN");
    assert_eq!(body["services"]["user_service"]["healthy"], false);
    assert_eq!(body["services"]["user_service"]["failures"], 5);
    assert_eq!(body["services"]["article_service"]["circuit"], "CLOSED");
}

#[tokio::test]
async fn test_breakers_are_independent_per_backend() {
    let mut config = test_config();
    config.circuit_breaker.max_failures = 2;
    config.circuit_breaker.on_timeout = TimeoutPolicy::CountAsFailure;
    let app = router(&config, upstreams(&config, unreachable_channel(), unreachable_channel()));

    for _ in 0..2 {
        send(&app, get("/api/v1/articles/1")).await;
    }
    let (_, _, body) = send(&app, get("/api/v1/articles/1")).await;
    assert_eq!(body["code"], "014");

    let (_, _, body) = send(&app, get("/health")).await;
    assert_eq!(body["services"]["article_service"]["circuit"], "OPEN");
    assert_eq!(body["services"]["user_service"]["circuit"], "CLOSED");
}
