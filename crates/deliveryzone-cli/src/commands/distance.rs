//! `distance` subcommand.

use anyhow::{Context, Result};
use deliveryzone_lib::{haversine_km, GeoPoint};

use crate::output::{render_distance, DistanceReport, OutputFormat};
use crate::DistanceArgs;

pub fn handle_distance(args: &DistanceArgs, format: OutputFormat) -> Result<String> {
    let from = GeoPoint::new(args.from_lat, args.from_lng).context("invalid --from coordinate")?;
    let to = GeoPoint::new(args.to_lat, args.to_lng).context("invalid --to coordinate")?;
    let distance_km = haversine_km(&from, &to)?;

    render_distance(
        &DistanceReport {
            from,
            to,
            distance_km,
        },
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_longitude() {
        let args = DistanceArgs {
            from_lat: 45.0,
            from_lng: 7.0,
            to_lat: 45.0,
            to_lng: 181.0,
        };
        let err = handle_distance(&args, OutputFormat::Text).expect_err("invalid longitude");
        assert!(format!("{err:#}").contains("invalid longitude"));
    }

    #[test]
    fn same_point_is_zero() {
        let args = DistanceArgs {
            from_lat: 45.0703,
            from_lng: 7.6869,
            to_lat: 45.0703,
            to_lng: 7.6869,
        };
        assert_eq!(
            handle_distance(&args, OutputFormat::Note).unwrap(),
            "0.00 km\n"
        );
    }
}
