//! Configuration module
//!
//! Handles CLI argument parsing and TOML configuration files that declare named
//! distributions.
//!
//! ```toml
//! [sampling]
//! seed = 42
//! count = 100000
//!
//! [distributions.payload_size]
//! parser = "size"
//! spec = "10%:1M, 3:4k, 64k"
//!
//! [distributions.operation]
//! parser = "word"
//! spec = "5%:remove, 4:get, 1:put"
//! ```

pub mod cli;
pub mod toml;

use crate::codec::{Codec, IntegerParser, SizeParser, WordParser};
use crate::distribution::DiscreteDistribution;
use crate::error::FuzzyError;
use crate::stats::SampleReport;
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub distributions: BTreeMap<String, DistributionConfig>,
}

/// Defaults for the `sample` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Number of draws
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    100_000
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            count: default_count(),
        }
    }
}

/// One named distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionConfig {
    #[serde(default)]
    pub parser: ParserKind,
    pub spec: String,
}

/// Value type of a configured distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Non-negative integers
    #[default]
    Integer,
    /// Byte sizes with k/m/g/t suffixes
    Size,
    /// Identifiers such as operation names
    Word,
}

impl ParserKind {
    /// Parse `spec` with the matching value parser
    pub fn build(self, spec: &str) -> std::result::Result<AnyDistribution, FuzzyError> {
        Ok(match self {
            ParserKind::Integer => AnyDistribution::Integer(Codec::new(IntegerParser)?.parse(spec)?),
            ParserKind::Size => AnyDistribution::Size(Codec::new(SizeParser)?.parse(spec)?),
            ParserKind::Word => AnyDistribution::Word(Codec::new(WordParser)?.parse(spec)?),
        })
    }

    /// Regex accepted for whole specifications of this kind
    pub fn allowed_pattern(self) -> std::result::Result<String, FuzzyError> {
        Ok(match self {
            ParserKind::Integer => Codec::new(IntegerParser)?.allowed_pattern().to_string(),
            ParserKind::Size => Codec::new(SizeParser)?.allowed_pattern().to_string(),
            ParserKind::Word => Codec::new(WordParser)?.allowed_pattern().to_string(),
        })
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserKind::Integer => write!(f, "integer"),
            ParserKind::Size => write!(f, "size"),
            ParserKind::Word => write!(f, "word"),
        }
    }
}

/// A distribution built from configuration, whatever its value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyDistribution {
    Integer(DiscreteDistribution<u64>),
    Size(DiscreteDistribution<u64>),
    Word(DiscreteDistribution<String>),
}

impl AnyDistribution {
    pub fn kind(&self) -> ParserKind {
        match self {
            AnyDistribution::Integer(_) => ParserKind::Integer,
            AnyDistribution::Size(_) => ParserKind::Size,
            AnyDistribution::Word(_) => ParserKind::Word,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyDistribution::Integer(d) | AnyDistribution::Size(d) => d.len(),
            AnyDistribution::Word(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(value, marginal %, cumulative %)` for every entry, as display strings
    pub fn table(&self) -> Vec<(String, String, String)> {
        fn rows<T: fmt::Display>(d: &DiscreteDistribution<T>) -> Vec<(String, String, String)> {
            use crate::distribution::probability::format_percent;

            d.marginal_probabilities()
                .into_iter()
                .zip(d.cumulative_probabilities())
                .map(|((value, marginal), cumulative)| {
                    (
                        value.to_string(),
                        format_percent(&marginal),
                        format_percent(cumulative),
                    )
                })
                .collect()
        }

        match self {
            AnyDistribution::Integer(d) | AnyDistribution::Size(d) => rows(d),
            AnyDistribution::Word(d) => rows(d),
        }
    }

    pub fn sample_report<R: Rng + ?Sized>(&self, rng: &mut R, samples: u64) -> SampleReport {
        match self {
            AnyDistribution::Integer(d) | AnyDistribution::Size(d) => {
                SampleReport::collect(d, rng, samples)
            }
            AnyDistribution::Word(d) => SampleReport::collect(d, rng, samples),
        }
    }
}

impl fmt::Display for AnyDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyDistribution::Integer(d) | AnyDistribution::Size(d) => write!(f, "{}", d),
            AnyDistribution::Word(d) => write!(f, "{}", d),
        }
    }
}

impl Config {
    /// Build every configured distribution, failing on the first invalid one
    pub fn build_distributions(&self) -> Result<BTreeMap<String, AnyDistribution>> {
        self.distributions
            .iter()
            .map(|(name, dist)| {
                let built = dist
                    .parser
                    .build(&dist.spec)
                    .with_context(|| format!("Invalid distribution '{}': {}", name, dist.spec))?;
                Ok((name.clone(), built))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(parser: ParserKind, spec: &str) -> Config {
        let mut config = Config::default();
        config.distributions.insert(
            "test".to_string(),
            DistributionConfig {
                parser,
                spec: spec.to_string(),
            },
        );
        config
    }

    #[test]
    fn test_build_each_kind() {
        let built = config_with(ParserKind::Size, "50%:4k, 1M").build_distributions().unwrap();
        assert_eq!(built["test"].kind(), ParserKind::Size);
        assert_eq!(built["test"].to_string(), "[50.0%: 4096, 50.0%: 1048576]");

        let built = config_with(ParserKind::Word, "get, 3:put").build_distributions().unwrap();
        assert_eq!(built["test"].to_string(), "[25.0%: get, 75.0%: put]");

        let built = config_with(ParserKind::Integer, "7").build_distributions().unwrap();
        assert_eq!(built["test"].len(), 1);
    }

    #[test]
    fn test_invalid_distribution_names_entry() {
        let err = config_with(ParserKind::Integer, "60%:1, 50%:2")
            .build_distributions()
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid distribution 'test'"), "{}", message);
        assert!(message.contains("exceeds 1"), "{}", message);
        assert_eq!(
            err.downcast_ref::<FuzzyError>(),
            Some(&FuzzyError::ProbabilityOverflow(
                crate::distribution::probability::ratio(11, 10)
            ))
        );
    }

    #[test]
    fn test_table() {
        let dist = ParserKind::Word.build("25%:a, b").unwrap();
        assert_eq!(
            dist.table(),
            vec![
                ("a".to_string(), "25.0".to_string(), "25.0".to_string()),
                ("b".to_string(), "75.0".to_string(), "100.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_allowed_pattern_per_kind() {
        let pattern = ParserKind::Size.allowed_pattern().unwrap();
        assert!(pattern.contains("[kKmMgGtT]"));
    }
}
