//! `resolve` subcommand: coordinate or address to delivery quote.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use deliveryzone_lib::{
    DeliveryZoneResolver, GeoPoint, Geocoder, NominatimGeocoder, ResolutionSummary,
    StaticGeocoder,
};

use crate::commands::load_settings_for_cli;
use crate::output::{render_resolution, OutputFormat};
use crate::ResolveArgs;

pub fn handle_resolve(
    config: Option<&Path>,
    args: &ResolveArgs,
    format: OutputFormat,
) -> Result<String> {
    // Validate the customer input before touching the settings file.
    let explicit = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            Some(GeoPoint::new(lat, lng).context("invalid customer coordinate")?)
        }
        _ => None,
    };

    let (_, settings) = load_settings_for_cli(config)?;
    let resolver = DeliveryZoneResolver::from_settings(&settings)
        .context("failed to build resolver from delivery settings")?;

    let (customer, address) = match (explicit, args.address.as_deref()) {
        (Some(point), _) => (point, None),
        (None, Some(address)) => (geocode(args, address)?, Some(address)),
        (None, None) => bail!("either --lat/--lng or --address is required"),
    };

    let result = resolver.resolve(&customer)?;
    debug!(
        customer = %customer,
        distance_km = result.distance_km(),
        matched = result.is_matched(),
        "customer resolved"
    );

    let mut summary =
        ResolutionSummary::new(customer, *resolver.restaurant(), result, &settings.currency);
    if let Some(address) = address {
        summary = summary.with_address(address);
    }
    render_resolution(&summary, format)
}

fn geocode(args: &ResolveArgs, address: &str) -> Result<GeoPoint> {
    let geocoder: Box<dyn Geocoder> = match &args.geocoder_fixture {
        Some(path) => Box::new(StaticGeocoder::from_path(path).with_context(|| {
            format!("failed to load geocoder fixture from {}", path.display())
        })?),
        None => Box::new(NominatimGeocoder::from_env()?),
    };

    geocoder
        .geocode(address)
        .with_context(|| format!("failed to geocode '{address}'"))?
        .with_context(|| format!("no coordinates found for address '{address}'"))
}
