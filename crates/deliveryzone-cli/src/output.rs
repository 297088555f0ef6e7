//! Output formatting for CLI results.
//!
//! Resolution summaries reuse the library renderers; listings and reports
//! that only exist on the command line are rendered here.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use deliveryzone_lib::{
    format_fee, round_to_cents, DeliveryZone, GeoPoint, ResolutionRenderMode, ResolutionSummary,
};

/// Output format shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable multi-line text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Markdown.
    Rich,
    /// A single compact line, suitable for notes or chat messages.
    Note,
}

impl OutputFormat {
    /// Library render mode for textual formats; `None` for JSON.
    pub fn render_mode(self) -> Option<ResolutionRenderMode> {
        match self {
            OutputFormat::Text => Some(ResolutionRenderMode::PlainText),
            OutputFormat::Rich => Some(ResolutionRenderMode::RichText),
            OutputFormat::Note => Some(ResolutionRenderMode::Note),
            OutputFormat::Json => None,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

/// Render a resolution summary.
pub fn render_resolution(summary: &ResolutionSummary, format: OutputFormat) -> Result<String> {
    match format.render_mode() {
        Some(mode) => Ok(summary.render(mode)),
        None => to_json(summary),
    }
}

/// Result of the `distance` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: f64,
}

pub fn render_distance(report: &DistanceReport, format: OutputFormat) -> Result<String> {
    let distance = round_to_cents(report.distance_km);
    Ok(match format {
        OutputFormat::Json => return to_json(report),
        OutputFormat::Text => format!(
            "Distance from {} to {}: {distance:.2} km\n",
            report.from, report.to
        ),
        OutputFormat::Rich => format!(
            "`{}` → `{}`: **{distance:.2} km**\n",
            report.from, report.to
        ),
        OutputFormat::Note => format!("{distance:.2} km\n"),
    })
}

/// Zone table as printed by the `zones` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneListing {
    pub restaurant: GeoPoint,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delivery_distance_km: Option<f64>,
    pub zones: Vec<DeliveryZone>,
}

pub fn render_zones(listing: &ZoneListing, format: OutputFormat) -> Result<String> {
    let mut buffer = String::new();
    match format {
        OutputFormat::Json => return to_json(listing),
        OutputFormat::Text => {
            let _ = writeln!(
                buffer,
                "Delivery zones around {} ({} configured):",
                listing.restaurant,
                listing.zones.len()
            );
            for zone in &listing.zones {
                let _ = writeln!(
                    buffer,
                    "- {:<16} {:<20} up to {:>6.2} km  {:>8}  {}{}",
                    zone.id,
                    zone.name,
                    zone.max_distance_km,
                    format_fee(zone.delivery_fee, &listing.currency),
                    zone.estimated_time,
                    inactive_marker(zone)
                );
            }
            if let Some(limit) = listing.max_delivery_distance_km {
                let _ = writeln!(buffer, "Delivery cutoff: {limit:.2} km");
            }
        }
        OutputFormat::Rich => {
            let _ = writeln!(buffer, "| Zone | Name | Radius | Fee | ETA |");
            let _ = writeln!(buffer, "| --- | --- | ---: | ---: | --- |");
            for zone in &listing.zones {
                let _ = writeln!(
                    buffer,
                    "| `{}` | {}{} | {:.2} km | {} | {} |",
                    zone.id,
                    zone.name,
                    inactive_marker(zone),
                    zone.max_distance_km,
                    format_fee(zone.delivery_fee, &listing.currency),
                    zone.estimated_time
                );
            }
        }
        OutputFormat::Note => {
            let parts: Vec<String> = listing
                .zones
                .iter()
                .map(|zone| {
                    format!(
                        "{} ≤{} km {}",
                        zone.name,
                        zone.max_distance_km,
                        format_fee(zone.delivery_fee, &listing.currency)
                    )
                })
                .collect();
            let _ = writeln!(buffer, "{}", parts.join(", "));
        }
    }
    Ok(buffer)
}

fn inactive_marker(zone: &DeliveryZone) -> &'static str {
    if zone.is_active {
        ""
    } else {
        " (inactive)"
    }
}

/// Result of the `validate` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub path: PathBuf,
    pub zones: usize,
    pub active_zones: usize,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delivery_distance_km: Option<f64>,
}

pub fn render_validation(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => return to_json(report),
        OutputFormat::Text | OutputFormat::Rich => format!(
            "Settings OK: {} ({} zones, {} active, currency {})\n",
            report.path.display(),
            report.zones,
            report.active_zones,
            report.currency
        ),
        OutputFormat::Note => format!("OK {} active zones\n", report.active_zones),
    })
}
