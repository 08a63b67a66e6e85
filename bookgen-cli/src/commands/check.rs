//! Check command implementation

use super::load_config;
use anyhow::{Context, Result};
use bookgen_core::Generator;
use std::path::Path;

/// Validate the configuration and confirm every input exists
pub async fn check(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let chapters = config.order().len();
    let title = config.default_title().to_string();

    Generator::new(config)
        .check()
        .await
        .with_context(|| format!("Check failed for {}", config_path.display()))?;

    println!("Valid book configuration");
    println!("  Title:    {}", title);
    println!("  Chapters: {}", chapters);

    Ok(())
}
