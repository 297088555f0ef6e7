//! Geographic coordinates and great-circle distance.
//!
//! Distances are computed with the haversine formula on a spherical Earth of
//! radius [`EARTH_RADIUS_KM`]. All arithmetic is `f64`; nothing is rounded here.

use serde::{Deserialize, Serialize};

use crate::error::{CoordinateField, Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in signed decimal degrees.
///
/// Fields are public so the type can be deserialized straight from settings
/// and request payloads; use [`GeoPoint::new`] or [`GeoPoint::validate`] before
/// trusting a value that came from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated point.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCoordinate`] when either component is non-finite
    /// or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Check the latitude/longitude invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinate {
                field: CoordinateField::Latitude,
                value: self.lat,
            });
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinate {
                field: CoordinateField::Longitude,
                value: self.lng,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Great-circle distance in kilometres between two points.
///
/// Inputs are assumed valid; see [`haversine_km`] for the checked variant.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let half_chord = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

/// Validate both points, then compute the great-circle distance in kilometres.
///
/// ```
/// use deliveryzone_lib::{haversine_km, GeoPoint};
///
/// let turin = GeoPoint::new(45.0703, 7.6869).unwrap();
/// let milan = GeoPoint::new(45.4642, 9.19).unwrap();
/// let km = haversine_km(&turin, &milan).unwrap();
/// assert!((km - 125.5).abs() < 1.0);
/// ```
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> Result<f64> {
    a.validate()?;
    b.validate()?;
    Ok(distance_km(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = GeoPoint::new(200.0, 7.0).expect_err("latitude out of range");
        match err {
            Error::InvalidCoordinate { field, value } => {
                assert_eq!(field, CoordinateField::Latitude);
                assert_eq!(value, 200.0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_longitude() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = GeoPoint::new(45.0, value).expect_err("non-finite longitude");
            assert!(matches!(
                err,
                Error::InvalidCoordinate {
                    field: CoordinateField::Longitude,
                    ..
                }
            ));
        }
    }

    #[test]
    fn accepts_extreme_but_valid_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn deserializes_long_field_names() {
        let point: GeoPoint =
            serde_json::from_str(r#"{"latitude":45.0703,"longitude":7.6869}"#).unwrap();
        assert_eq!(point, GeoPoint::new(45.0703, 7.6869).unwrap());
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        assert!((distance_km(&a, &b) - 111.19).abs() < 0.01);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, 180.0).unwrap();
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance_km(&a, &b) - expected).abs() < 1e-6);
    }
}
