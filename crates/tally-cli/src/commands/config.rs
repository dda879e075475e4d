//! Config command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::config::{default_config_path, EngineConfig};

/// Print the effective configuration
pub fn cmd_config_show(config: Option<&Path>) -> Result<()> {
    let config = EngineConfig::load(config).context("Failed to load engine config")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Show where a config override should be placed
pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            println!("{}", path.display());

            if !path.exists() {
                eprintln!();
                eprintln!("Note: This file does not exist yet.");
                eprintln!("Create it to override the built-in defaults.");
            }
        }
        None => {
            eprintln!("Could not determine config directory.");
            eprintln!("The data directory is not available on this system.");
        }
    }

    Ok(())
}
