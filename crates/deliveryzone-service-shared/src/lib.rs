//! Shared infrastructure for delivery zone HTTP microservices.
//!
//! - [`AppState`]: settings and resolver loaded once at startup
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 error bodies
//! - [`ServiceResponse`]: success wrapper carrying content type and request id
//! - [`metrics`]: Prometheus recorder and quote metrics
//! - [`logging`]: JSON or text log setup
//! - [`middleware`]: request ids and HTTP metrics
//!
//! Handlers stay thin: parse, validate, call `deliveryzone-lib`, format.
//!
//! Enable the `test-utils` feature to use [`test_utils`] from dependent crates.

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_quote_distance, record_quote_failed,
    record_quote_out_of_range, record_quote_resolved, record_resolution, MetricsConfig,
    MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_COORDINATE,
    PROBLEM_INVALID_REQUEST, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{QuoteRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
