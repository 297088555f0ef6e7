//! Prometheus metrics for delivery quote services.
//!
//! ```no_run
//! use deliveryzone_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics(&MetricsConfig::from_env()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```
//!
//! Quote metrics:
//! - `deliveryzone_quotes_resolved_total{zone}`
//! - `deliveryzone_quotes_out_of_range_total`
//! - `deliveryzone_quotes_failed_total{reason}`
//! - `deliveryzone_quote_distance_km` (histogram)

use deliveryzone_lib::ResolutionResult;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Buckets for the quote distance histogram, in kilometres.
const DISTANCE_BUCKETS_KM: &[f64] = &[0.5, 1.0, 2.0, 3.0, 5.0, 7.5, 10.0, 15.0, 25.0, 50.0];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route the exporter is mounted on.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED` (anything but `false` enables) and `METRICS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());
        Self { enabled, path }
    }
}

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            metrics_exporter_prometheus::Matcher::Full("deliveryzone_quote_distance_km".to_string()),
            DISTANCE_BUCKETS_KM,
        )
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `None` until [`init_metrics`] succeeds.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// `GET /metrics` in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => write!(f, "failed to install metrics recorder: {}", e),
        }
    }
}

impl std::error::Error for MetricsError {}

pub fn record_quote_resolved(zone_id: &str) {
    metrics::counter!(
        "deliveryzone_quotes_resolved_total",
        "zone" => zone_id.to_string()
    )
    .increment(1);
}

pub fn record_quote_out_of_range() {
    metrics::counter!("deliveryzone_quotes_out_of_range_total").increment(1);
}

/// `reason` is a short label such as `invalid_coordinate` or `invalid_request`.
pub fn record_quote_failed(reason: &str) {
    metrics::counter!(
        "deliveryzone_quotes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

pub fn record_quote_distance(distance_km: f64) {
    metrics::histogram!("deliveryzone_quote_distance_km").record(distance_km);
}

/// Record every metric a completed resolution contributes to.
pub fn record_resolution(result: &ResolutionResult) {
    record_quote_distance(result.distance_km());
    match result {
        ResolutionResult::Matched { zone, .. } => record_quote_resolved(&zone.id),
        ResolutionResult::OutOfRange { .. } => record_quote_out_of_range(),
    }
}
