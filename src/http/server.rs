//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every gateway route
//! - Wire up middleware (request ID, tracing, CORS, request timeout)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::body::Body;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::gateway::{ArticleDispatcher, UserDispatcher, Upstreams};
use crate::http::handlers::{articles, health, users};
use crate::http::middleware::request_timeout;
use crate::http::request::{request_span, UuidRequestId};

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstreams: Upstreams,
}

impl AppState {
    pub fn new(upstreams: Upstreams) -> Self {
        Self { upstreams }
    }

    pub fn users(&self) -> &UserDispatcher {
        &self.upstreams.users
    }

    pub fn articles(&self) -> &ArticleDispatcher {
        &self.upstreams.articles
    }
}

/// Build the gateway router with all middleware layers.
pub fn build_router(state: AppState, request_timeout_after: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health::health))
        .route("/users", post(users::create_user))
        .route("/articles", post(articles::create_article))
        .nest("/api/v1", api_routes())
        .layer(middleware::from_fn_with_state(request_timeout_after, request_timeout))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/auth/login", post(users::login))
        .route("/auth/refresh", post(users::refresh_token))
        .route("/auth/validate", post(users::validate_token))
        .route("/auth/logout", post(users::logout))
        .route("/articles", post(articles::create_article).get(articles::list_articles))
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &GatewayConfig, upstreams: Upstreams) -> Self {
        let router = build_router(
            AppState::new(upstreams),
            Duration::from_secs(config.timeouts.request_secs),
        );
        Self { router }
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
