//! `GET /health`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::health::HealthReport;
use crate::http::server::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let users = state.users();
    let articles = state.articles();
    let report = HealthReport::from_services([
        (users.name().to_string(), users.health()),
        (articles.name().to_string(), articles.health()),
    ]);
    if !report.is_healthy() {
        tracing::debug!(?report, "Gateway degraded");
    }
    (report.http_status(), Json(report))
}
