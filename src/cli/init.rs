//! Init command - write an example configuration file

use crate::config::{example_config, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = write_example(dir, force)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nEdit it to change the fetch timeout, user agent or default output format.");
    Ok(())
}

fn write_example(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    std::fs::write(&config_path, example_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
