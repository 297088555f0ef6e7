//! Delivery zone library entry points.
//!
//! This crate computes the great-circle distance between a customer and the
//! restaurant, resolves the delivery zone (fee and estimated time) that applies,
//! loads the typed delivery settings that feed the resolver, and renders quotes
//! for display. Higher-level consumers (CLI, HTTP services) should only depend
//! on the functions exported here instead of reimplementing behavior.

pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod output;
pub mod resolver;
pub mod zone;

pub use config::{load_settings, resolve_settings_path, DeliverySettings, SETTINGS_PATH_ENV};
pub use error::{CoordinateField, Error, Result};
pub use geo::{distance_km, haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use geocode::{Geocoder, NominatimGeocoder, StaticGeocoder};
pub use output::{
    format_fee, round_to_cents, DeliveryQuote, ResolutionRenderMode, ResolutionSummary,
};
pub use resolver::{resolve, resolve_with_limit, DeliveryZoneResolver, ResolutionResult};
pub use zone::DeliveryZone;
