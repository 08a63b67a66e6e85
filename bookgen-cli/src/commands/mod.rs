//! CLI command implementations

mod build;
mod check;
mod list;

pub use build::build;
pub use check::check;
pub use list::list;

use anyhow::{Context, Result};
use bookgen_core::{Config, ConfigValidator, RawConfig};
use std::path::Path;

/// Read and validate the configuration file
fn load_config(path: &Path) -> Result<Config> {
    let raw = RawConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    let config = ConfigValidator::validate(raw)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::debug!(
        "Loaded configuration with {} chapters from {}",
        config.order().len(),
        path.display()
    );
    Ok(config)
}
