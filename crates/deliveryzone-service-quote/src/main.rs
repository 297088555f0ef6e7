//! Delivery quote HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /api/v1/delivery/quote` - resolve a customer coordinate to a zone and fee
//! - `GET /api/v1/delivery/zones` - active zones, smallest radius first
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health/live`, `GET /health/ready` - probes
//!
//! # Configuration
//!
//! - `DELIVERYZONE_CONFIG` - settings file (default: platform config dir)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG`, `LOG_FORMAT`, `SERVICE_NAME` - logging
//! - `METRICS_ENABLED` - Prometheus recorder (default: true)

use std::env;
use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use deliveryzone_lib::{
    resolve_settings_path, DeliveryQuote, DeliveryZone, GeoPoint, ResolutionResult,
};
use deliveryzone_service_shared::{
    from_lib_error, health_live, health_ready, init_logging, init_metrics, metrics_handler,
    record_quote_failed, record_resolution, AppState, LoggingConfig, MetricsConfig, MetricsLayer,
    ProblemDetails, QuoteRequest, RequestId, ServiceResponse, Validate,
};

/// Quote returned to the caller.
#[derive(Debug, Serialize)]
struct QuoteResponse {
    /// `status`, `distance_km`, and `zone` or `max_configured_distance`.
    #[serde(flatten)]
    result: ResolutionResult,
    /// Display-ready fee; absent when out of range.
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<DeliveryQuote>,
    /// RFC 3339 time the quote was computed.
    quoted_at: String,
}

/// Zone table as served to ordering front-ends.
#[derive(Debug, Serialize)]
struct ZonesResponse {
    restaurant: GeoPoint,
    currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_delivery_distance_km: Option<f64>,
    max_configured_distance: f64,
    zones: Vec<DeliveryZone>,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("quote");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let settings_path = resolve_settings_path(None)?;
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(settings = %settings_path.display(), port = port, "starting quote service");

    let state = AppState::load(&settings_path).map_err(|e| {
        error!(error = %e, path = %settings_path.display(), "failed to load application state");
        e
    })?;

    if !state.is_ready() {
        warn!("no active delivery zones; every quote will be out of range");
    }

    let app = build_router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/v1/delivery/quote", post(quote_handler))
        .route("/api/v1/delivery/zones", get(zones_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

/// Handle POST /api/v1/delivery/quote requests.
async fn quote_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response<QuoteResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_quote_failed("invalid_request");
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id.as_str(),
            ));
        }
    };

    if let Err(problem) = request.validate(request_id.as_str()) {
        warn!(
            request_id = %request_id,
            lat = request.lat,
            lng = request.lng,
            "rejected invalid coordinate"
        );
        record_quote_failed("invalid_coordinate");
        return Response::Error(*problem);
    }

    let result = match request
        .customer()
        .and_then(|customer| state.resolver().resolve(&customer))
    {
        Ok(result) => result,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "zone resolution failed");
            record_quote_failed("internal_error");
            return Response::Error(from_lib_error(&e, request_id.as_str()));
        }
    };

    record_resolution(&result);
    info!(
        request_id = %request_id,
        distance_km = result.distance_km(),
        zone = result.zone().map(|z| z.id.as_str()).unwrap_or("-"),
        "quote computed"
    );

    let quote = DeliveryQuote::from_resolution(&result, state.currency());
    let response = QuoteResponse {
        result,
        quote,
        quoted_at: chrono::Utc::now().to_rfc3339(),
    };
    Response::Success(ServiceResponse::new(response).with_request_id(request_id.as_str()))
}

/// Handle GET /api/v1/delivery/zones requests.
async fn zones_handler(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Response<ZonesResponse> {
    let resolver = state.resolver();
    let response = ZonesResponse {
        restaurant: *resolver.restaurant(),
        currency: state.currency().to_string(),
        max_delivery_distance_km: resolver.max_delivery_distance_km(),
        max_configured_distance: resolver.max_configured_distance(),
        zones: resolver.active_zones().to_vec(),
    };
    Response::Success(ServiceResponse::new(response).with_request_id(request_id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use deliveryzone_lib::DeliverySettings;
    use deliveryzone_service_shared::test_utils::{fixture_points, test_state};
    use serde_json::{json, Value};

    fn server() -> TestServer {
        TestServer::new(build_router(test_state(), "/metrics")).expect("test server")
    }

    fn quote_body((lat, lng): (f64, f64)) -> Value {
        json!({ "lat": lat, "lng": lng })
    }

    #[tokio::test]
    async fn restaurant_location_quotes_centro() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&quote_body(fixture_points::RESTAURANT))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "matched");
        assert_eq!(body["distance_km"], 0.0);
        assert_eq!(body["zone"]["id"], "centro");
        assert_eq!(body["quote"]["delivery_fee"], 2.0);
        assert_eq!(body["quote"]["formatted_fee"], "€2.00");
        assert_eq!(body["content_type"], "application/json");
        assert!(body["quoted_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn seven_km_quotes_periferia() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&quote_body(fixture_points::PERIFERIA))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["zone"]["id"], "periferia");
        assert_eq!(body["quote"]["delivery_fee"], 5.0);
        let distance = body["distance_km"].as_f64().unwrap();
        assert!((distance - 7.3).abs() < 0.05);
    }

    #[tokio::test]
    async fn far_customer_is_out_of_range_with_200() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&quote_body(fixture_points::BEYOND_RANGE))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "out_of_range");
        assert_eq!(body["max_configured_distance"], 10.0);
        assert!(body.get("quote").is_none());
        assert!(body.get("zone").is_none());
    }

    #[tokio::test]
    async fn invalid_latitude_is_a_problem() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&json!({ "lat": 200.0, "lng": 7.6869 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-coordinate");
        assert_eq!(body["field"], "lat");
        assert!(body["instance"].as_str().is_some());
    }

    #[tokio::test]
    async fn malformed_body_is_an_invalid_request() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&json!({ "lat": 45.0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-request");
    }

    #[tokio::test]
    async fn responses_carry_request_id_header() {
        let response = server()
            .post("/api/v1/delivery/quote")
            .json(&quote_body(fixture_points::RESTAURANT))
            .await;

        let header = response
            .headers()
            .get("x-request-id")
            .expect("request id header")
            .to_str()
            .unwrap()
            .to_string();
        let body: Value = response.json();
        assert_eq!(body["request_id"], header.as_str());
    }

    #[tokio::test]
    async fn zones_lists_active_zones_sorted() {
        let response = server().get("/api/v1/delivery/zones").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let ids: Vec<&str> = body["zones"]
            .as_array()
            .unwrap()
            .iter()
            .map(|z| z["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["centro", "semicentro", "periferia"]);
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["max_configured_distance"], 10.0);
    }

    #[tokio::test]
    async fn health_probes() {
        let server = server();
        server.get("/health/live").await.assert_status_ok();

        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        let body: Value = ready.json();
        assert_eq!(body["active_zones"], 3);
    }

    #[tokio::test]
    async fn readiness_fails_without_active_zones() {
        let mut settings: DeliverySettings = test_state().settings().clone();
        for zone in &mut settings.zones {
            zone.is_active = false;
        }
        let state = AppState::from_settings(settings).unwrap();
        let server = TestServer::new(build_router(state, "/metrics")).unwrap();

        server
            .get("/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let quote = server
            .post("/api/v1/delivery/quote")
            .json(&quote_body(fixture_points::RESTAURANT))
            .await;
        quote.assert_status_ok();
        let body: Value = quote.json();
        assert_eq!(body["status"], "out_of_range");
    }

    #[tokio::test]
    async fn metrics_endpoint_responds() {
        let response = server().get("/metrics").await;
        response.assert_status_ok();
    }
}
