//! `zones` subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use deliveryzone_lib::{DeliveryZone, DeliveryZoneResolver};

use crate::commands::load_settings_for_cli;
use crate::output::{render_zones, OutputFormat, ZoneListing};
use crate::ZonesArgs;

pub fn handle_zones(config: Option<&Path>, args: &ZonesArgs, format: OutputFormat) -> Result<String> {
    let (_, settings) = load_settings_for_cli(config)?;

    let zones: Vec<DeliveryZone> = if args.all {
        let mut all = settings.zones.clone();
        all.sort_by(|a, b| a.max_distance_km.total_cmp(&b.max_distance_km));
        all
    } else {
        DeliveryZoneResolver::from_settings(&settings)
            .context("failed to build resolver from delivery settings")?
            .active_zones()
            .to_vec()
    };

    render_zones(
        &ZoneListing {
            restaurant: settings.restaurant,
            currency: settings.currency.clone(),
            max_delivery_distance_km: settings.max_delivery_distance_km,
            zones,
        },
        format,
    )
}
