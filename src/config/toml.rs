//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the configuration named on the command line, or the defaults
///
/// CLI sampling flags take precedence over the `[sampling]` table.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    if let Some(seed) = cli.seed {
        config.sampling.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        config.sampling.count = count;
    }

    Ok(config)
}
