//! `validate` subcommand.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::commands::load_settings_for_cli;
use crate::output::{render_validation, OutputFormat, ValidationReport};

pub fn handle_validate(config: Option<&Path>, format: OutputFormat) -> Result<String> {
    let (path, settings) = load_settings_for_cli(config)?;
    if settings.active_zone_count() == 0 {
        info!(path = %path.display(), "settings have no active zones; every address is out of range");
    }

    render_validation(
        &ValidationReport {
            path,
            zones: settings.zones.len(),
            active_zones: settings.active_zone_count(),
            currency: settings.currency.clone(),
            max_delivery_distance_km: settings.max_delivery_distance_km,
        },
        format,
    )
}
