//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body of `/health/live` and `/health/ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,

    pub service: String,

    pub version: String,

    /// Active zones in the loaded settings (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_zones: Option<usize>,

    /// Furthest distance currently served (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_configured_distance_km: Option<f64>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            active_zones: None,
            max_configured_distance_km: None,
        }
    }

    pub fn ready(service: &str, version: &str, active_zones: usize, max_distance_km: f64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            active_zones: Some(active_zones),
            max_configured_distance_km: Some(max_distance_km),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            active_zones: Some(0),
            max_configured_distance_km: None,
        }
    }
}

/// `GET /health/live`: 200 whenever the process is serving.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: 200 when at least one zone is active, 503 otherwise.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"deliveryzone-service-shared","version":"0.1.0","active_zones":3,"max_configured_distance_km":10.0}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if !state.is_ready() {
        let status = HealthStatus::not_ready(service, version, "no active delivery zones");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        state.active_zone_count(),
        state.resolver().max_configured_distance(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
