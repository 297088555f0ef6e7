//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use deliveryzone_lib::{Error as LibError, GeoPoint};

use crate::problem::{from_lib_error, ProblemDetails};

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to keep `Result::Err` small; the
/// `request_id` becomes the problem's `instance`.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/delivery/quote`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Customer latitude in decimal degrees.
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Customer longitude in decimal degrees.
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl QuoteRequest {
    /// The customer coordinate, validated.
    pub fn customer(&self) -> Result<GeoPoint, LibError> {
        GeoPoint::new(self.lat, self.lng)
    }
}

impl Validate for QuoteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.customer()
            .map(|_| ())
            .map_err(|err| Box::new(from_lib_error(&err, request_id)))
    }
}
