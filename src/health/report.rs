//! Aggregated gateway health.

use axum::http::StatusCode;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::health::state::ServiceHealth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub services: BTreeMap<String, ServiceHealth>,
}

impl HealthReport {
    pub fn from_services<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = (S, ServiceHealth)>,
        S: Into<String>,
    {
        let services: BTreeMap<String, ServiceHealth> =
            services.into_iter().map(|(name, health)| (name.into(), health)).collect();
        let status = if services.values().all(|s| s.healthy) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        };
        Self { status, services }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == OverallStatus::Healthy
    }

    /// 200 when every backend is healthy, 503 otherwise.
    pub fn http_status(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
