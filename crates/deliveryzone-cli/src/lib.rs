//! Delivery zone CLI library.
//!
//! Argument types and subcommand handlers for `deliveryzone-cli`. The binary
//! only parses flags, initialises tracing and dispatches into [`commands`].

use std::path::PathBuf;

use clap::{ArgGroup, Args};

pub mod commands;
pub mod output;

/// Arguments for `resolve`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("customer").required(true).args(["lat", "address"])))]
pub struct ResolveArgs {
    /// Customer latitude in decimal degrees.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Customer longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Free-text customer address, geocoded before resolution.
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub address: Option<String>,
    /// Resolve addresses from a JSON table instead of the online geocoder.
    #[arg(long, env = "DELIVERYZONE_GEOCODER_FIXTURE")]
    pub geocoder_fixture: Option<PathBuf>,
}

/// Arguments for `distance`.
#[derive(Args, Debug, Clone, Copy)]
pub struct DistanceArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub from_lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub from_lng: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub to_lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub to_lng: f64,
}

/// Arguments for `zones`.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ZonesArgs {
    /// Include inactive zones in the listing.
    #[arg(long)]
    pub all: bool,
}
