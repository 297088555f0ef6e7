use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use deliveryzone_cli::commands::{
    handle_distance, handle_resolve, handle_validate, handle_zones,
};
use deliveryzone_cli::output::OutputFormat;
use deliveryzone_cli::{DistanceArgs, ResolveArgs, ZonesArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Delivery zone resolution utilities")]
struct Cli {
    /// Path to the delivery settings file.
    #[arg(long, global = true, env = "DELIVERYZONE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the delivery zone for a customer coordinate or address.
    Resolve(ResolveArgs),
    /// Great-circle distance between two coordinates.
    Distance(DistanceArgs),
    /// List configured delivery zones, smallest radius first.
    Zones(ZonesArgs),
    /// Load and validate the settings file.
    Validate,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let rendered = match &cli.command {
        Command::Resolve(args) => handle_resolve(config, args, cli.format)?,
        Command::Distance(args) => handle_distance(args, cli.format)?,
        Command::Zones(args) => handle_zones(config, args, cli.format)?,
        Command::Validate => handle_validate(config, cli.format)?,
    };
    print!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
