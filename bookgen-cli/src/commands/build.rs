//! Build command implementation

use super::load_config;
use anyhow::{Context, Result};
use bookgen_core::Generator;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Generate the book described by `config_path`
pub async fn build(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(output) = output {
        config = config.with_output(output);
    }
    let title = config.default_title().to_string();
    let chapters = config.order().len();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Generating {} chapters...", chapters));

    let result = Generator::new(config)
        .run()
        .await
        .with_context(|| format!("Failed to generate '{}'", title));

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_with_message(format!(
        "Generated '{}': {} pages + {}",
        title,
        report.pages.len(),
        report.combined.display()
    ));
    println!(
        "Wrote {} pages and {}",
        report.pages.len(),
        report.combined.display()
    );

    Ok(())
}
