//! CLI argument parsing using clap

use super::ParserKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fuzzy - inspect and sample value distributions for load generation
#[derive(Parser, Debug)]
#[command(name = "fuzzy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file with [sampling] defaults and [distributions.<name>] tables
    #[arg(short = 'c', long, global = true, env = "FUZZY_CONFIG")]
    pub config: Option<PathBuf>,

    /// RNG seed for sampling (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of draws for sampling (overrides the config file)
    #[arg(short = 'n', long, global = true)]
    pub count: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a distribution and print its normalized form
    Check {
        /// Distribution, e.g. "10%:100, 2:200, 300"
        spec: String,

        /// Value type of the entries
        #[arg(short, long, value_enum, default_value_t = ParserKind::Integer)]
        parser: ParserKind,

        /// Print the accepted specification regex instead of parsing
        #[arg(long)]
        pattern: bool,
    },

    /// Draw values and compare observed with configured frequencies
    Sample {
        /// Distribution specification, or the name of a configured distribution
        spec: String,

        /// Value type of the entries (ignored for configured names)
        #[arg(short, long, value_enum, default_value_t = ParserKind::Integer)]
        parser: ParserKind,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build and print every distribution in the config file
    Show,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.count == Some(0) {
            anyhow::bail!("count must be at least 1");
        }

        if self.command == Command::Show && self.config.is_none() {
            anyhow::bail!("show requires --config");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["fuzzy", "check", "10%:1, 2", "--parser", "size"]);
        assert_eq!(
            cli.command,
            Command::Check {
                spec: "10%:1, 2".to_string(),
                parser: ParserKind::Size,
                pattern: false,
            }
        );
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["fuzzy", "sample", "1, 2", "--seed", "3", "-n", "50", "--json"]);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.count, Some(50));
        assert!(matches!(cli.command, Command::Sample { json: true, .. }));
    }

    #[test]
    fn test_validate_count() {
        let cli = Cli::parse_from(["fuzzy", "sample", "1", "--count", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_show_needs_config() {
        let cli = Cli::parse_from(["fuzzy", "show"]);
        assert!(cli.validate().is_err());
    }
}
