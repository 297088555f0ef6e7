//! Typed delivery settings.
//!
//! The settings store keeps the restaurant location, zone table and global
//! delivery cutoff as a JSON document. This module parses that document into
//! [`DeliverySettings`] and validates it once, at load time, so the resolver
//! never sees malformed configuration.
//!
//! # Location
//!
//! [`resolve_settings_path`] picks, in order: an explicit path, the
//! `DELIVERYZONE_CONFIG` environment variable, then
//! `<platform config dir>/delivery_settings.json`.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::zone::DeliveryZone;

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "DELIVERYZONE_CONFIG";

/// Default filename inside the platform config directory.
const SETTINGS_FILENAME: &str = "delivery_settings.json";

const DEFAULT_CURRENCY: &str = "EUR";

/// Delivery configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettings {
    /// Fixed restaurant location.
    #[serde(alias = "restaurantLocation")]
    pub restaurant: GeoPoint,
    /// Zone table in configured order.
    #[serde(default)]
    pub zones: Vec<DeliveryZone>,
    /// Global cutoff in kilometres.
    #[serde(
        default,
        alias = "maxDeliveryDistanceKm",
        rename = "maxDeliveryDistance",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_delivery_distance_km: Option<f64>,
    /// ISO-4217 currency code used when presenting fees.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl DeliverySettings {
    /// Load and validate settings from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SettingsNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "loading delivery settings");
        let file = fs::File::open(path)?;
        let settings = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            zones = settings.zones.len(),
            active_zones = settings.active_zone_count(),
            "delivery settings loaded"
        );
        Ok(settings)
    }

    /// Load and validate settings from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let settings: Self = serde_json::from_reader(reader)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Check every invariant the resolver relies on.
    pub fn validate(&self) -> Result<()> {
        self.restaurant
            .validate()
            .map_err(|err| Error::InvalidSettings {
                message: format!("restaurant location: {err}"),
            })?;

        if let Some(limit) = self.max_delivery_distance_km {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::InvalidSettings {
                    message: format!(
                        "maxDeliveryDistance must be a finite non-negative number, got {limit}"
                    ),
                });
            }
        }

        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidSettings {
                message: format!(
                    "currency must be a three-letter ISO-4217 code, got '{}'",
                    self.currency
                ),
            });
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            zone.validate()?;
            if !seen.insert(zone.id.as_str()) {
                return Err(Error::DuplicateZoneId {
                    id: zone.id.clone(),
                });
            }
        }

        self.warn_on_shared_boundaries();
        Ok(())
    }

    pub fn active_zone_count(&self) -> usize {
        self.zones.iter().filter(|zone| zone.is_active).count()
    }

    // Shared radii are legal; the first configured zone wins, which may surprise.
    fn warn_on_shared_boundaries(&self) {
        let mut radii: Vec<(f64, &str)> = self
            .zones
            .iter()
            .filter(|zone| zone.is_active)
            .map(|zone| (zone.max_distance_km, zone.id.as_str()))
            .collect();
        radii.sort_by(|a, b| a.0.total_cmp(&b.0));

        for pair in radii.windows(2) {
            if pair[0].0 == pair[1].0 {
                warn!(
                    boundary_km = pair[0].0,
                    first = pair[0].1,
                    second = pair[1].1,
                    "active zones share a boundary; the first configured zone wins"
                );
            }
        }
    }
}

/// Pick the settings file to load.
pub fn resolve_settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(SETTINGS_PATH_ENV) {
        return Ok(PathBuf::from(env_path));
    }
    default_settings_path()
}

/// Platform-specific default location for the settings file.
pub fn default_settings_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "deliveryzone", "deliveryzone")
        .ok_or(Error::ConfigDirsUnavailable)?;
    Ok(dirs.config_dir().join(SETTINGS_FILENAME))
}

/// Resolve the settings path and load it.
pub fn load_settings(explicit: Option<&Path>) -> Result<DeliverySettings> {
    let path = resolve_settings_path(explicit)?;
    DeliverySettings::from_path(&path)
}
