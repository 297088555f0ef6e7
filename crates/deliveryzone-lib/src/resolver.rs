//! Delivery zone resolution.
//!
//! Maps a customer coordinate to the smallest active zone that covers its
//! distance from the restaurant, or reports the address as out of range.
//!
//! # Rules
//!
//! - Distance is the haversine great-circle distance ([`crate::geo::distance_km`]).
//! - Inactive zones are ignored entirely.
//! - Active zones are stable-sorted by `max_distance_km`; the first zone with
//!   `max_distance_km >= distance` wins, so a point exactly on a boundary
//!   belongs to the smaller zone and equal radii keep their configured order.
//! - An optional global `max_delivery_distance_km` is a final cutoff: beyond
//!   it the result is [`ResolutionResult::OutOfRange`] even if a zone matches.
//!
//! # Example
//!
//! ```
//! use deliveryzone_lib::{resolve, DeliveryZone, GeoPoint, ResolutionResult};
//!
//! let restaurant = GeoPoint::new(45.0703, 7.6869).unwrap();
//! let zones = vec![
//!     DeliveryZone::new("near", "Near", 2.0, 2.0, "15-25 minutes"),
//!     DeliveryZone::new("far", "Far", 10.0, 5.0, "35-50 minutes"),
//! ];
//!
//! let result = resolve(&restaurant, &restaurant, &zones).unwrap();
//! match result {
//!     ResolutionResult::Matched { zone, distance_km } => {
//!         assert_eq!(zone.id, "near");
//!         assert_eq!(distance_km, 0.0);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::DeliverySettings;
use crate::error::{Error, Result};
use crate::geo::{distance_km, GeoPoint};
use crate::zone::DeliveryZone;

/// Outcome of resolving a customer coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// The customer lies inside `zone`.
    Matched { zone: DeliveryZone, distance_km: f64 },
    /// No active zone (or the global cutoff) admits the customer.
    OutOfRange {
        distance_km: f64,
        max_configured_distance: f64,
    },
}

impl ResolutionResult {
    /// Great-circle distance from the restaurant, in kilometres.
    pub fn distance_km(&self) -> f64 {
        match self {
            ResolutionResult::Matched { distance_km, .. } => *distance_km,
            ResolutionResult::OutOfRange { distance_km, .. } => *distance_km,
        }
    }

    /// The matched zone, if any.
    pub fn zone(&self) -> Option<&DeliveryZone> {
        match self {
            ResolutionResult::Matched { zone, .. } => Some(zone),
            ResolutionResult::OutOfRange { .. } => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ResolutionResult::Matched { .. })
    }
}

/// Resolve `customer` against `zones` around `restaurant` with no global cutoff.
///
/// # Errors
/// Returns [`Error::InvalidCoordinate`] if either point is invalid. No distance
/// is computed in that case.
pub fn resolve(
    customer: &GeoPoint,
    restaurant: &GeoPoint,
    zones: &[DeliveryZone],
) -> Result<ResolutionResult> {
    resolve_with_limit(customer, restaurant, zones, None)
}

/// Resolve with an optional global `max_delivery_distance_km` cutoff.
pub fn resolve_with_limit(
    customer: &GeoPoint,
    restaurant: &GeoPoint,
    zones: &[DeliveryZone],
    max_delivery_distance_km: Option<f64>,
) -> Result<ResolutionResult> {
    customer.validate()?;
    restaurant.validate()?;

    let active = sorted_active(zones);
    let distance = distance_km(restaurant, customer);
    Ok(match_zone(&active, distance, max_delivery_distance_km))
}

/// Immutable, pre-sorted zone table bound to a restaurant location.
///
/// Build it once from [`DeliverySettings`] and share it (it is `Send + Sync`);
/// every call to [`DeliveryZoneResolver::resolve`] is a pure function of its
/// input.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryZoneResolver {
    restaurant: GeoPoint,
    zones: Vec<DeliveryZone>,
    max_delivery_distance_km: Option<f64>,
}

impl DeliveryZoneResolver {
    /// Create a resolver for `restaurant`. Inactive zones are dropped here.
    pub fn new(restaurant: GeoPoint, zones: &[DeliveryZone]) -> Result<Self> {
        restaurant.validate()?;
        Ok(Self {
            restaurant,
            zones: sorted_active(zones),
            max_delivery_distance_km: None,
        })
    }

    /// Build a resolver from validated settings.
    pub fn from_settings(settings: &DeliverySettings) -> Result<Self> {
        let resolver = Self::new(settings.restaurant, &settings.zones)?;
        resolver.with_max_delivery_distance(settings.max_delivery_distance_km)
    }

    /// Apply a global cutoff in kilometres (`None` disables it).
    pub fn with_max_delivery_distance(mut self, max_km: Option<f64>) -> Result<Self> {
        if let Some(limit) = max_km {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::InvalidSettings {
                    message: format!(
                        "maxDeliveryDistance must be a finite non-negative number, got {limit}"
                    ),
                });
            }
        }
        self.max_delivery_distance_km = max_km;
        Ok(self)
    }

    pub fn restaurant(&self) -> &GeoPoint {
        &self.restaurant
    }

    /// Active zones, smallest radius first.
    pub fn active_zones(&self) -> &[DeliveryZone] {
        &self.zones
    }

    pub fn max_delivery_distance_km(&self) -> Option<f64> {
        self.max_delivery_distance_km
    }

    /// Furthest distance any customer can be served at.
    pub fn max_configured_distance(&self) -> f64 {
        max_configured_distance(&self.zones, self.max_delivery_distance_km)
    }

    /// Resolve one customer coordinate.
    pub fn resolve(&self, customer: &GeoPoint) -> Result<ResolutionResult> {
        customer.validate()?;
        let distance = distance_km(&self.restaurant, customer);
        Ok(match_zone(
            &self.zones,
            distance,
            self.max_delivery_distance_km,
        ))
    }

    /// Resolve a batch; each entry fails or succeeds independently.
    pub fn resolve_many(&self, customers: &[GeoPoint]) -> Vec<Result<ResolutionResult>> {
        customers
            .iter()
            .map(|customer| self.resolve(customer))
            .collect()
    }
}

fn sorted_active(zones: &[DeliveryZone]) -> Vec<DeliveryZone> {
    let mut active: Vec<DeliveryZone> = zones.iter().filter(|z| z.is_active).cloned().collect();
    // sort_by is stable: equal radii keep configured order.
    active.sort_by(|a, b| a.max_distance_km.total_cmp(&b.max_distance_km));
    active
}

fn max_configured_distance(active: &[DeliveryZone], limit: Option<f64>) -> f64 {
    let largest = active
        .iter()
        .map(|zone| zone.max_distance_km)
        .filter(|km| km.is_finite())
        .fold(None, |acc: Option<f64>, km| Some(acc.map_or(km, |a| a.max(km))));

    match (largest, limit) {
        (Some(largest), Some(limit)) => largest.min(limit),
        (Some(largest), None) => largest,
        (None, Some(limit)) => limit,
        (None, None) => 0.0,
    }
}

fn match_zone(active: &[DeliveryZone], distance: f64, limit: Option<f64>) -> ResolutionResult {
    let beyond_cutoff = limit.is_some_and(|limit| distance > limit);

    if !beyond_cutoff {
        if let Some(zone) = active.iter().find(|zone| zone.covers(distance)) {
            return ResolutionResult::Matched {
                zone: zone.clone(),
                distance_km: distance,
            };
        }
    }

    ResolutionResult::OutOfRange {
        distance_km: distance,
        max_configured_distance: max_configured_distance(active, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant() -> GeoPoint {
        GeoPoint::new(45.0703, 7.6869).unwrap()
    }

    fn zones() -> Vec<DeliveryZone> {
        vec![
            DeliveryZone::new("z10", "Outer", 10.0, 5.0, "35-50 minutes"),
            DeliveryZone::new("z2", "Centre", 2.0, 2.0, "15-25 minutes"),
            DeliveryZone::new("z5", "Inner", 5.0, 3.5, "25-35 minutes"),
        ]
    }

    #[test]
    fn sorts_zones_regardless_of_configured_order() {
        let resolver = DeliveryZoneResolver::new(restaurant(), &zones()).unwrap();
        let ids: Vec<&str> = resolver
            .active_zones()
            .iter()
            .map(|z| z.id.as_str())
            .collect();
        assert_eq!(ids, vec!["z2", "z5", "z10"]);
    }

    #[test]
    fn equal_radii_keep_configured_order() {
        let zones = vec![
            DeliveryZone::new("first", "First", 3.0, 1.0, ""),
            DeliveryZone::new("second", "Second", 3.0, 9.0, ""),
        ];
        let result = resolve(&restaurant(), &restaurant(), &zones).unwrap();
        assert_eq!(result.zone().map(|z| z.id.as_str()), Some("first"));
    }

    #[test]
    fn cutoff_overrides_matching_zone() {
        let customer = GeoPoint::new(45.1360, 7.6869).unwrap(); // ~7.3 km north
        let result = resolve_with_limit(&customer, &restaurant(), &zones(), Some(6.0)).unwrap();
        match result {
            ResolutionResult::OutOfRange {
                max_configured_distance,
                ..
            } => assert_eq!(max_configured_distance, 6.0),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn cutoff_above_largest_zone_reports_zone_radius() {
        let customer = GeoPoint::new(45.2052, 7.6869).unwrap(); // ~15 km north
        let result = resolve_with_limit(&customer, &restaurant(), &zones(), Some(20.0)).unwrap();
        match result {
            ResolutionResult::OutOfRange {
                max_configured_distance,
                ..
            } => assert_eq!(max_configured_distance, 10.0),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn empty_zones_report_cutoff_as_max() {
        let result = resolve_with_limit(&restaurant(), &restaurant(), &[], Some(8.0)).unwrap();
        assert_eq!(
            result,
            ResolutionResult::OutOfRange {
                distance_km: 0.0,
                max_configured_distance: 8.0
            }
        );
    }

    #[test]
    fn invalid_restaurant_is_rejected() {
        let bad = GeoPoint {
            lat: 45.0,
            lng: 500.0,
        };
        let err = resolve(&restaurant(), &bad, &zones()).expect_err("invalid restaurant");
        assert!(err.is_invalid_input());
        assert!(DeliveryZoneResolver::new(bad, &zones()).is_err());
    }

    #[test]
    fn negative_cutoff_is_rejected() {
        let resolver = DeliveryZoneResolver::new(restaurant(), &zones()).unwrap();
        assert!(resolver.with_max_delivery_distance(Some(-1.0)).is_err());
    }

    #[test]
    fn resolve_many_keeps_failures_per_entry() {
        let resolver = DeliveryZoneResolver::new(restaurant(), &zones()).unwrap();
        let batch = [
            restaurant(),
            GeoPoint {
                lat: f64::NAN,
                lng: 0.0,
            },
        ];
        let results = resolver.resolve_many(&batch);
        assert_eq!(results.len(), 2);
        assert!(results[0].as_ref().unwrap().is_matched());
        assert!(results[1].is_err());
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let result = ResolutionResult::OutOfRange {
            distance_km: 15.0,
            max_configured_distance: 10.0,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"out_of_range\""));
        assert!(json.contains("\"max_configured_distance\":10.0"));
    }
}
