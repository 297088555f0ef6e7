//! Delivery zone records.
//!
//! A zone is a ring around the restaurant with a flat fee. Zones nest: a
//! distance belongs to the smallest active zone whose radius covers it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One configured delivery tier.
///
/// Serialized with the camelCase keys used by the settings store
/// (`maxDistanceKm`, `deliveryFee`, `estimatedTime`, `isActive`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZone {
    pub id: String,
    pub name: String,
    #[serde(alias = "maxDistance", alias = "max_distance_km")]
    pub max_distance_km: f64,
    #[serde(alias = "delivery_fee", alias = "fee")]
    pub delivery_fee: f64,
    #[serde(default, alias = "estimated_time")]
    pub estimated_time: String,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl DeliveryZone {
    /// Build an active zone.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        max_distance_km: f64,
        delivery_fee: f64,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_distance_km,
            delivery_fee,
            estimated_time: estimated_time.into(),
            is_active: true,
        }
    }

    /// Return a copy with `is_active` set.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Whether a point `distance_km` away from the restaurant falls inside this zone.
    ///
    /// The boundary is inclusive.
    pub fn covers(&self, distance_km: f64) -> bool {
        self.max_distance_km >= distance_km
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidSettings {
                message: "zone id must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidSettings {
                message: format!("zone '{}' must have a name", self.id),
            });
        }

        let fields = [
            (self.max_distance_km, "maxDistanceKm"),
            (self.delivery_fee, "deliveryFee"),
        ];
        for (value, field) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSettings {
                    message: format!(
                        "{field} for zone '{}' must be a finite non-negative number, got {value}",
                        self.id
                    ),
                });
            }
        }

        Ok(())
    }
}
