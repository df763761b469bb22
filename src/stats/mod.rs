//! Sampling statistics
//!
//! Draws a batch of samples from a distribution and compares the observed
//! frequency of every entry with its configured marginal probability. Used by the
//! `sample` command to sanity-check a specification before it drives a real run.
//!
//! # Example
//!
//! ```
//! use fuzzy::codec::{Codec, IntegerParser};
//! use fuzzy::stats::SampleReport;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let dist = Codec::new(IntegerParser)?.parse("10%:100, 2:200, 300")?;
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let report = SampleReport::collect(&dist, &mut rng, 100_000);
//!
//! assert_eq!(report.samples, 100_000);
//! assert!(report.max_deviation() < 1.0);
//! # Ok::<(), fuzzy::FuzzyError>(())
//! ```

use crate::distribution::probability::to_f64;
use crate::distribution::DiscreteDistribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observed vs. configured frequency of one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// Display form of the value
    pub value: String,
    /// Configured marginal probability, in percent
    pub expected_percent: f64,
    /// Observed frequency, in percent
    pub observed_percent: f64,
    /// Number of draws that produced this entry
    pub count: u64,
}

/// Result of drawing `samples` values from a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub samples: u64,
    pub rows: Vec<SampleRow>,
}

impl SampleReport {
    /// Draw `samples` values and tally them per entry
    ///
    /// Entries are counted by position, so a value listed twice gets two rows.
    pub fn collect<T, R>(dist: &DiscreteDistribution<T>, rng: &mut R, samples: u64) -> Self
    where
        T: fmt::Display,
        R: Rng + ?Sized,
    {
        let mut counts = vec![0u64; dist.len()];
        for _ in 0..samples {
            counts[dist.next_index(rng)] += 1;
        }

        let rows = dist
            .marginal_probabilities()
            .into_iter()
            .zip(counts)
            .map(|((value, marginal), count)| SampleRow {
                value: value.to_string(),
                expected_percent: to_f64(&marginal) * 100.0,
                observed_percent: percent_of(count, samples),
                count,
            })
            .collect();

        tracing::debug!(samples, "collected sample report");
        Self { samples, rows }
    }

    /// Largest absolute difference between observed and expected percent
    pub fn max_deviation(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| (row.observed_percent - row.expected_percent).abs())
            .fold(0.0, f64::max)
    }
}

fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
