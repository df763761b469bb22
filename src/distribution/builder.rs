//! Entry accumulation and normalization
//!
//! A [`Builder`] collects two kinds of entries:
//!
//! - **Fixed**: an exact fraction of all draws (`add_fixed(v, 0.05)` means 5%)
//! - **Weighted**: a share of whatever mass the fixed entries leave over,
//!   proportional to the entry's weight relative to the sum of all weights
//!
//! [`Builder::create`] checks that the two kinds fit together and produces the
//! immutable cumulative table used for sampling.
//!
//! # Example
//!
//! ```
//! use fuzzy::distribution::{Builder, probability::ratio};
//!
//! let mut builder = Builder::new();
//! builder.add_fixed(100u64, ratio(1, 10))?;
//! builder.add_weighted(200u64, ratio(2, 1))?;
//! builder.add_weighted(300u64, ratio(1, 1))?;
//!
//! let dist = builder.create()?;
//! assert_eq!(dist.to_string(), "[10.0%: 100, 60.0%: 200, 30.0%: 300]");
//! # Ok::<(), fuzzy::FuzzyError>(())
//! ```

use super::probability::{format_ratio, is_valid_probability, Probability};
use super::DiscreteDistribution;
use crate::error::{FuzzyError, Result};
use num::rational::BigRational;
use num::traits::{One, Signed, Zero};

/// How much of the distribution an entry claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Share {
    /// Exact probability in (0, 1]
    Fixed(Probability),
    /// Relative weight (> 0) over the mass left by fixed entries
    Weighted(Probability),
}

/// A value with its share, as accepted by [`DiscreteDistribution::from_entries`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    pub value: T,
    pub share: Share,
}

impl<T> Entry<T> {
    pub fn fixed(value: T, probability: Probability) -> Self {
        Self {
            value,
            share: Share::Fixed(probability),
        }
    }

    pub fn weighted(value: T, weight: Probability) -> Self {
        Self {
            value,
            share: Share::Weighted(weight),
        }
    }
}

/// Mutable accumulator for distribution entries
///
/// Each `add_*` call validates its argument immediately. The builder is consumed
/// by [`create`](Builder::create).
#[derive(Debug, Clone)]
pub struct Builder<T> {
    fixed: Vec<(T, Probability)>,
    weighted: Vec<(T, Probability)>,
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Builder<T> {
    pub fn new() -> Self {
        Self {
            fixed: Vec::new(),
            weighted: Vec::new(),
        }
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.fixed.len() + self.weighted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a value that receives a share of the remaining mass
    ///
    /// Fails with [`FuzzyError::InvalidWeight`] unless `weight > 0`.
    pub fn add_weighted(&mut self, value: T, weight: Probability) -> Result<&mut Self> {
        if !weight.is_positive() {
            return Err(FuzzyError::InvalidWeight(weight));
        }
        self.weighted.push((value, weight));
        Ok(self)
    }

    /// Add a value drawn with exactly `probability`
    ///
    /// Fails with [`FuzzyError::InvalidProbability`] unless `0 < probability <= 1`.
    pub fn add_fixed(&mut self, value: T, probability: Probability) -> Result<&mut Self> {
        if !is_valid_probability(&probability) {
            return Err(FuzzyError::InvalidProbability(probability));
        }
        self.fixed.push((value, probability));
        Ok(self)
    }

    /// Add a tagged entry
    pub fn add(&mut self, entry: Entry<T>) -> Result<&mut Self> {
        match entry.share {
            Share::Fixed(p) => self.add_fixed(entry.value, p),
            Share::Weighted(w) => self.add_weighted(entry.value, w),
        }
    }

    /// Normalize the entries into a distribution
    ///
    /// Fixed entries come first in insertion order, then weighted entries in
    /// insertion order. The last cumulative probability is set to exactly 1.
    pub fn create(self) -> Result<DiscreteDistribution<T>> {
        if self.is_empty() {
            return Err(FuzzyError::EmptyDistribution);
        }

        let mut cumulative = Vec::with_capacity(self.len());
        let mut running = BigRational::zero();
        for (_, p) in &self.fixed {
            running += p;
            cumulative.push(running.clone());
        }

        let one = BigRational::one();
        if running > one {
            return Err(FuzzyError::ProbabilityOverflow(running));
        }
        if self.weighted.is_empty() && running < one {
            return Err(FuzzyError::ProbabilityMismatch(running));
        }
        if !self.weighted.is_empty() && running == one {
            return Err(FuzzyError::ProbabilityExhausted(self.weighted.len()));
        }

        let fixed_total = running.clone();
        let total_weight: BigRational = self.weighted.iter().map(|(_, w)| w).sum();
        let remaining = &one - &fixed_total;
        for (_, weight) in &self.weighted {
            let share = &remaining * weight / &total_weight;
            tracing::trace!(
                weight = %format_ratio(weight),
                share = %format_ratio(&share),
                "weighted entry"
            );
            running += share;
            cumulative.push(running.clone());
        }

        if let Some(last) = cumulative.last_mut() {
            *last = one;
        }

        tracing::debug!(
            fixed = self.fixed.len(),
            weighted = self.weighted.len(),
            fixed_total = %format_ratio(&fixed_total),
            "normalized distribution"
        );

        let values = self
            .fixed
            .into_iter()
            .chain(self.weighted)
            .map(|(value, _)| value)
            .collect();

        Ok(DiscreteDistribution::from_parts(values, cumulative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::probability::ratio;
    use proptest::prelude::*;

    #[test]
    fn test_add_fixed_rejects_out_of_range() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.add_fixed("a", ratio(3, 2)).unwrap_err(),
            FuzzyError::InvalidProbability(ratio(3, 2))
        );
        assert_eq!(
            builder.add_fixed("a", ratio(0, 1)).unwrap_err(),
            FuzzyError::InvalidProbability(ratio(0, 1))
        );
        assert!(builder.is_empty());
        assert!(builder.add_fixed("a", ratio(1, 1)).is_ok());
    }

    #[test]
    fn test_add_weighted_rejects_non_positive() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.add_weighted("a", ratio(0, 1)).unwrap_err(),
            FuzzyError::InvalidWeight(ratio(0, 1))
        );
        assert_eq!(
            builder.add_weighted("a", ratio(-2, 1)).unwrap_err(),
            FuzzyError::InvalidWeight(ratio(-2, 1))
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn test_create_empty() {
        let builder: Builder<u64> = Builder::new();
        assert_eq!(builder.create().unwrap_err(), FuzzyError::EmptyDistribution);
    }

    #[test]
    fn test_create_overflow() {
        let mut builder = Builder::new();
        builder.add_fixed("a", ratio(6, 10)).unwrap();
        builder.add_fixed("b", ratio(5, 10)).unwrap();
        assert_eq!(
            builder.create().unwrap_err(),
            FuzzyError::ProbabilityOverflow(ratio(11, 10))
        );
    }

    #[test]
    fn test_create_overflow_with_weighted() {
        let mut builder = Builder::new();
        builder.add_fixed("a", ratio(6, 10)).unwrap();
        builder.add_fixed("b", ratio(5, 10)).unwrap();
        builder.add_weighted("c", ratio(1, 1)).unwrap();
        assert_eq!(
            builder.create().unwrap_err(),
            FuzzyError::ProbabilityOverflow(ratio(11, 10))
        );
    }

    #[test]
    fn test_create_mismatch() {
        let mut builder = Builder::new();
        builder.add_fixed("a", ratio(1, 2)).unwrap();
        assert_eq!(
            builder.create().unwrap_err(),
            FuzzyError::ProbabilityMismatch(ratio(1, 2))
        );
    }

    #[test]
    fn test_create_exhausted() {
        let mut builder = Builder::new();
        builder.add_fixed("a", ratio(1, 2)).unwrap();
        builder.add_fixed("b", ratio(1, 2)).unwrap();
        builder.add_weighted("c", ratio(1, 1)).unwrap();
        assert_eq!(
            builder.create().unwrap_err(),
            FuzzyError::ProbabilityExhausted(1)
        );
    }

    #[test]
    fn test_fixed_only() {
        let mut builder = Builder::new();
        builder
            .add_fixed("a", ratio(1, 4))
            .unwrap()
            .add_fixed("b", ratio(3, 4))
            .unwrap();
        let dist = builder.create().unwrap();
        assert_eq!(dist.values(), &["a", "b"]);
        assert_eq!(dist.cumulative_probabilities(), &[ratio(1, 4), ratio(1, 1)]);
    }

    #[test]
    fn test_fixed_come_before_weighted() {
        let mut builder = Builder::new();
        builder.add_weighted("w1", ratio(1, 1)).unwrap();
        builder.add_fixed("f1", ratio(3, 10)).unwrap();
        builder.add_weighted("w2", ratio(1, 1)).unwrap();
        builder.add_fixed("f2", ratio(1, 10)).unwrap();
        let dist = builder.create().unwrap();

        assert_eq!(dist.values(), &["f1", "f2", "w1", "w2"]);
        assert_eq!(
            dist.cumulative_probabilities(),
            &[ratio(3, 10), ratio(4, 10), ratio(7, 10), ratio(1, 1)]
        );
    }

    #[test]
    fn test_weighted_split_is_exact() {
        let mut builder = Builder::new();
        for value in ["a", "b", "c"] {
            builder.add_weighted(value, ratio(1, 1)).unwrap();
        }
        let dist = builder.create().unwrap();
        assert_eq!(
            dist.cumulative_probabilities(),
            &[ratio(1, 3), ratio(2, 3), ratio(1, 1)]
        );
    }

    #[test]
    fn test_add_tagged_entries() {
        let mut builder = Builder::new();
        builder.add(Entry::fixed(1u64, ratio(1, 2))).unwrap();
        builder.add(Entry::weighted(2u64, ratio(3, 1))).unwrap();
        assert_eq!(
            builder.add(Entry::weighted(3u64, ratio(0, 1))).unwrap_err(),
            FuzzyError::InvalidWeight(ratio(0, 1))
        );
        assert_eq!(builder.len(), 2);
    }

    fn arb_entries() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
        // Fixed entries in thousandths, kept below 1000 in total by construction.
        (
            prop::collection::vec(1u32..=100, 0..8),
            prop::collection::vec(1u32..=50, 1..8),
        )
    }

    proptest! {
        #[test]
        fn prop_cumulative_is_monotone_and_ends_at_one((fixed, weights) in arb_entries()) {
            let mut builder = Builder::new();
            for (i, p) in fixed.iter().enumerate() {
                builder.add_fixed(i, ratio(i64::from(*p), 1000)).unwrap();
            }
            for (i, w) in weights.iter().enumerate() {
                builder.add_weighted(100 + i, ratio(i64::from(*w), 1)).unwrap();
            }
            let dist = builder.create().unwrap();
            let cumulative = dist.cumulative_probabilities();

            prop_assert_eq!(cumulative.len(), fixed.len() + weights.len());
            prop_assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(cumulative.last().unwrap(), &ratio(1, 1));
        }

        #[test]
        fn prop_weighted_marginals_follow_weights(weights in prop::collection::vec(1u32..=20, 1..6)) {
            let mut builder = Builder::new();
            for (i, w) in weights.iter().enumerate() {
                builder.add_weighted(i, ratio(i64::from(*w), 1)).unwrap();
            }
            let dist = builder.create().unwrap();
            let total: u32 = weights.iter().sum();

            for ((_, marginal), w) in dist.marginal_probabilities().into_iter().zip(&weights) {
                prop_assert_eq!(marginal, ratio(i64::from(*w), i64::from(total)));
            }
        }
    }
}
