//! Address-to-coordinate lookup.
//!
//! The resolver only consumes validated [`GeoPoint`]s; turning a free-text
//! address into one is the caller's job. [`Geocoder`] is the seam:
//! `Ok(None)` means the provider answered but found nothing, `Err` means the
//! lookup itself failed.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Environment variable overriding the Nominatim base URL.
pub const GEOCODER_URL_ENV: &str = "DELIVERYZONE_GEOCODER_URL";

const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Converts a free-text address into a coordinate.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>>;
}

/// Blocking client for a Nominatim-compatible `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimGeocoder {
    /// Create a client for `base_url` (without trailing `/search`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Use `DELIVERYZONE_GEOCODER_URL` if set, otherwise the public OpenStreetMap instance.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var(GEOCODER_URL_ENV).unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let url = format!("{}/search", self.base_url);
        debug!(url = %url, address = %address, "geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "jsonv2"), ("limit", "1"), ("q", address)])
            .header(ACCEPT, "application/json")
            .send()?
            .error_for_status()?;

        let places: Vec<NominatimPlace> = response.json()?;
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let point = parse_place(&place)?;
        debug!(
            address = %address,
            matched = place.display_name.as_deref().unwrap_or("<unnamed>"),
            point = %point,
            "address geocoded"
        );
        Ok(Some(point))
    }
}

fn parse_place(place: &NominatimPlace) -> Result<GeoPoint> {
    let parse = |raw: &str, field: &str| {
        raw.trim().parse::<f64>().map_err(|err| Error::Geocoding {
            message: format!("provider returned non-numeric {field} '{raw}': {err}"),
        })
    };
    let lat = parse(&place.lat, "lat")?;
    let lng = parse(&place.lon, "lon")?;
    GeoPoint::new(lat, lng).map_err(|err| {
        warn!(error = %err, "geocoding provider returned an invalid coordinate");
        Error::Geocoding {
            message: err.to_string(),
        }
    })
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "deliveryzone-lib/{version}",
        version = env!("CARGO_PKG_VERSION")
    )
}

/// In-memory geocoder keyed by normalised address.
///
/// Used for fixtures and offline runs; lookups ignore case and surrounding
/// or repeated whitespace.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, GeoPoint>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address. Invalid coordinates are rejected.
    pub fn insert(&mut self, address: &str, point: GeoPoint) -> Result<()> {
        point.validate()?;
        self.entries.insert(normalize_address(address), point);
        Ok(())
    }

    /// Builder-style [`StaticGeocoder::insert`].
    pub fn with_entry(mut self, address: &str, point: GeoPoint) -> Result<Self> {
        self.insert(address, point)?;
        Ok(self)
    }

    /// Load a JSON object mapping addresses to `{"lat": .., "lng": ..}`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: HashMap<String, GeoPoint> = serde_json::from_str(json)?;
        let mut geocoder = Self::new();
        for (address, point) in table {
            geocoder.insert(&address, point)?;
        }
        Ok(geocoder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
        Ok(self.entries.get(&normalize_address(address)).copied())
    }
}

fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_lookup_ignores_case_and_spacing() {
        let geocoder = StaticGeocoder::new()
            .with_entry("Piazza Castello, Torino", GeoPoint::new(45.0712, 7.6856).unwrap())
            .unwrap();
        let found = geocoder
            .geocode("  piazza   castello, TORINO ")
            .unwrap()
            .expect("address present");
        assert_eq!(found.lat, 45.0712);
        assert!(geocoder.geocode("Via Po 1").unwrap().is_none());
    }

    #[test]
    fn static_geocoder_rejects_invalid_points() {
        let mut geocoder = StaticGeocoder::new();
        let err = geocoder
            .insert("nowhere", GeoPoint { lat: 120.0, lng: 0.0 })
            .expect_err("invalid point");
        assert!(err.is_invalid_input());
        assert!(geocoder.is_empty());
    }

    #[test]
    fn static_geocoder_loads_json_table() {
        let geocoder = StaticGeocoder::from_json_str(
            r#"{"Via Roma 1, Torino": {"lat": 45.0677, "lng": 7.6825}}"#,
        )
        .unwrap();
        assert_eq!(geocoder.len(), 1);
        assert!(geocoder.geocode("via roma 1, torino").unwrap().is_some());
    }

    #[test]
    fn parses_provider_strings() {
        let place = NominatimPlace {
            lat: "45.0703".to_string(),
            lon: "7.6869".to_string(),
            display_name: None,
        };
        assert_eq!(parse_place(&place).unwrap(), GeoPoint::new(45.0703, 7.6869).unwrap());
    }

    #[test]
    fn rejects_provider_garbage() {
        let place = NominatimPlace {
            lat: "north".to_string(),
            lon: "7.6869".to_string(),
            display_name: None,
        };
        assert!(matches!(parse_place(&place), Err(Error::Geocoding { .. })));

        let place = NominatimPlace {
            lat: "91".to_string(),
            lon: "7".to_string(),
            display_name: None,
        };
        assert!(matches!(parse_place(&place), Err(Error::Geocoding { .. })));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let geocoder = NominatimGeocoder::new("http://localhost:8088/").unwrap();
        assert_eq!(geocoder.base_url(), "http://localhost:8088");
    }
}
