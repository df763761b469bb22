//! fuzzy - discrete value distributions for load generation
//!
//! Benchmark workloads rarely use a single payload size or a single operation.
//! This crate lets an operator describe a mix of values in a compact text form
//! and lets the load generator draw one value per operation from it.
//!
//! # Architecture
//!
//! - **Builder**: collects fixed-probability and weighted entries, validates them
//!   and normalizes them into an exact cumulative table
//! - **DiscreteDistribution**: immutable, shareable sampler over that table
//! - **Codec**: parses `"10%:4k, 2:8k, 64k"` style text through a pluggable
//!   value parser and formats distributions back to text
//! - **Config / CLI**: named distributions in TOML and a small inspection tool
//!
//! # Example
//!
//! ```
//! use fuzzy::codec::{Codec, SizeParser};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let sizes = Codec::new(SizeParser)?.parse("10%:1M, 2:4k, 64k")?;
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//!
//! let size = *sizes.next(&mut rng);
//! assert!([1024 * 1024, 4096, 65536].contains(&size));
//! # Ok::<(), fuzzy::FuzzyError>(())
//! ```

pub mod codec;
pub mod config;
pub mod distribution;
pub mod error;
pub mod output;
pub mod stats;

// Re-export commonly used types
pub use codec::{Codec, ValueParser};
pub use distribution::{Builder, DiscreteDistribution, Entry, Share};
pub use error::{FuzzyError, Result};
