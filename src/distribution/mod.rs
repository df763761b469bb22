//! Discrete value distributions
//!
//! A [`DiscreteDistribution`] maps a uniform draw from `[0, 1)` onto one of a small
//! set of values (payload sizes, operation names, ...). It is built once from a
//! [`Builder`] or from text via [`crate::codec::Codec`] and then shared read-only
//! by every worker for the rest of the run.
//!
//! # Sampling
//!
//! Values are laid out on `[0, 1)` in order, each owning the interval that ends at
//! its cumulative probability. A draw `x` belongs to the first value whose
//! cumulative probability is strictly greater than `x`, so a draw landing exactly
//! on a boundary goes to the value above it. The last cumulative probability is
//! exactly 1, so every draw in `[0, 1)` has an owner.
//!
//! The distribution holds no random state. Callers pass their own RNG, which keeps
//! reproducibility (seeding, per-worker streams) in the caller's hands.
//!
//! # Example
//!
//! ```
//! use fuzzy::distribution::DiscreteDistribution;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let dist = DiscreteDistribution::uniform(4096u64);
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! assert_eq!(*dist.next(&mut rng), 4096);
//! ```

pub mod builder;
pub mod probability;

pub use builder::{Builder, Entry, Share};

use crate::error::Result;
use num::rational::BigRational;
use num::traits::{One, Zero};
use probability::{apportion_percent, draw_threshold, Probability};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Immutable distribution over a finite, ordered set of values
///
/// Invariants: at least one value, cumulative probabilities non-decreasing, the
/// last one exactly 1.
#[derive(Debug, Clone)]
pub struct DiscreteDistribution<T> {
    values: Vec<T>,
    cumulative: Vec<Probability>,
    /// Float image of `cumulative` searched on every draw
    thresholds: Vec<f64>,
}

impl<T> DiscreteDistribution<T> {
    /// Distribution that always yields `value`
    pub fn uniform(value: T) -> Self {
        Self {
            values: vec![value],
            cumulative: vec![BigRational::one()],
            thresholds: vec![1.0],
        }
    }

    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    /// Build from tagged entries in one step
    ///
    /// Equivalent to adding every entry to a [`Builder`] and calling `create()`.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry<T>>,
    {
        let mut builder = Builder::new();
        for entry in entries {
            builder.add(entry)?;
        }
        builder.create()
    }

    pub(crate) fn from_parts(values: Vec<T>, cumulative: Vec<Probability>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert_eq!(values.len(), cumulative.len());
        debug_assert!(cumulative.last().map_or(false, |c| c.is_one()));
        let thresholds = cumulative.iter().map(draw_threshold).collect();
        Self {
            values,
            cumulative,
            thresholds,
        }
    }

    /// Number of entries (always at least 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in sampling order: fixed entries first, then weighted
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Cumulative probability of each value, in the same order as [`values`](Self::values)
    pub fn cumulative_probabilities(&self) -> &[Probability] {
        &self.cumulative
    }

    /// Draw one value
    ///
    /// Single-entry distributions return their value without reading from `rng`.
    pub fn next<R>(&self, rng: &mut R) -> &T
    where
        R: Rng + ?Sized,
    {
        &self.values[self.next_index(rng)]
    }

    /// Index of the next drawn value, see [`next`](Self::next)
    pub fn next_index<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        if self.values.len() == 1 {
            return 0;
        }
        self.index_at(rng.gen::<f64>())
    }

    /// Value owning the uniform draw `x`
    ///
    /// `x` is expected in `[0, 1)`. Draws at or above 1 (including `+inf`) resolve
    /// to the last value, negative or NaN draws to the first. The comparison is
    /// exact: `0.3_f64` lies slightly below `3/10` and therefore below a `30%`
    /// boundary.
    pub fn value_at(&self, x: f64) -> &T {
        &self.values[self.index_at(x)]
    }

    /// Index owning the uniform draw `x`, see [`value_at`](Self::value_at)
    pub fn index_at(&self, x: f64) -> usize {
        if self.values.len() == 1 {
            return 0;
        }
        let index = self.thresholds.partition_point(|t| *t <= x);
        index.min(self.values.len() - 1)
    }

    /// Marginal probability of each entry, in sampling order
    pub fn marginal_probabilities(&self) -> Vec<(&T, Probability)> {
        let mut previous = BigRational::zero();
        self.values
            .iter()
            .zip(&self.cumulative)
            .map(|(value, cumulative)| {
                let marginal = cumulative - &previous;
                previous = cumulative.clone();
                (value, marginal)
            })
            .collect()
    }
}

impl<T: PartialEq> PartialEq for DiscreteDistribution<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.cumulative == other.cumulative
    }
}

impl<T: Eq> Eq for DiscreteDistribution<T> {}

impl<T> DiscreteDistribution<T>
where
    T: Eq + Hash + Clone,
{
    /// Map each value to its **cumulative** probability
    ///
    /// Note this is the running total up to and including the value, not the
    /// value's own share; use [`marginal_probabilities`](Self::marginal_probabilities)
    /// for that. If a value appears more than once, its last entry wins.
    pub fn probability_map(&self) -> HashMap<T, Probability> {
        self.values
            .iter()
            .cloned()
            .zip(self.cumulative.iter().cloned())
            .collect()
    }
}

impl<T> rand::distributions::Distribution<T> for DiscreteDistribution<T>
where
    T: Clone,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.next(rng).clone()
    }
}

impl<T> fmt::Display for DiscreteDistribution<T>
where
    T: fmt::Display,
{
    /// Renders `[p1%: v1, p2%: v2, ...]` with marginal percentages
    ///
    /// Percentages have one decimal and add up to exactly 100, so the output
    /// parses back into an equivalent distribution (within 0.1 points per entry).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marginals: Vec<Probability> = self
            .marginal_probabilities()
            .into_iter()
            .map(|(_, p)| p)
            .collect();

        let percents = apportion_percent(&marginals);

        write!(f, "[")?;
        for (i, (value, percent)) in self.values.iter().zip(percents).enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}%: {}", percent, value)?;
        }
        write!(f, "]")
    }
}
