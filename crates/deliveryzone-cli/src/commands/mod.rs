//! Subcommand handlers.
//!
//! Each handler returns the rendered output so `main` only prints it.

pub mod distance;
pub mod resolve;
pub mod validate;
pub mod zones;

pub use distance::handle_distance;
pub use resolve::handle_resolve;
pub use validate::handle_validate;
pub use zones::handle_zones;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use deliveryzone_lib::{resolve_settings_path, DeliverySettings};

/// Resolve the settings path and load it, with CLI-facing error context.
pub(crate) fn load_settings_for_cli(config: Option<&Path>) -> Result<(PathBuf, DeliverySettings)> {
    let path = resolve_settings_path(config).context("failed to locate delivery settings")?;
    let settings = DeliverySettings::from_path(&path)
        .with_context(|| format!("failed to load delivery settings from {}", path.display()))?;
    Ok((path, settings))
}
