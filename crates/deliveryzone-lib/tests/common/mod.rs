#![allow(dead_code)]

use std::path::PathBuf;

use deliveryzone_lib::{DeliverySettings, DeliveryZone, GeoPoint};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn turin_settings() -> DeliverySettings {
    let path = fixtures_dir().join("turin_delivery_settings.json");
    DeliverySettings::from_path(&path).expect("load fixture delivery settings")
}

/// Restaurant location used throughout the fixtures (Turin).
pub fn turin() -> GeoPoint {
    GeoPoint::new(45.0703, 7.6869).expect("valid restaurant")
}

/// The 2 / 5 / 10 km ladder with fees 2.00 / 3.50 / 5.00.
pub fn ladder() -> Vec<DeliveryZone> {
    vec![
        DeliveryZone::new("z2", "Centre", 2.0, 2.0, "15-25 minutes"),
        DeliveryZone::new("z5", "Inner", 5.0, 3.5, "25-35 minutes"),
        DeliveryZone::new("z10", "Outer", 10.0, 5.0, "35-50 minutes"),
    ]
}

/// A point `km` kilometres due north of `origin`.
///
/// Along a meridian the haversine distance is exactly `R * dLat`, so this
/// gives precise distances for tests.
pub fn north_of(origin: &GeoPoint, km: f64) -> GeoPoint {
    let d_lat = (km / deliveryzone_lib::EARTH_RADIUS_KM).to_degrees();
    GeoPoint::new(origin.lat + d_lat, origin.lng).expect("valid offset point")
}
