//! Error types for distribution construction and parsing

use crate::distribution::probability::{format_ratio, Probability};
use thiserror::Error;

/// Failure to build or parse a distribution
///
/// Every variant is raised synchronously while a distribution is being
/// constructed. Sampling a built distribution never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuzzyError {
    #[error("invalid weight {}: weights must be greater than 0", format_ratio(.0))]
    InvalidWeight(Probability),

    #[error("invalid probability {}: must be greater than 0 and at most 1", format_ratio(.0))]
    InvalidProbability(Probability),

    #[error("distribution has no entries")]
    EmptyDistribution,

    #[error("fixed probabilities sum to {}, which exceeds 1", format_ratio(.0))]
    ProbabilityOverflow(Probability),

    #[error("fixed probabilities sum to {} and there are no weighted entries to take the rest", format_ratio(.0))]
    ProbabilityMismatch(Probability),

    #[error("fixed probabilities already sum to 1, leaving nothing for {0} weighted entries")]
    ProbabilityExhausted(usize),

    #[error("malformed distribution `{input}`: {reason}")]
    GrammarError { input: String, reason: String },

    #[error("token `{token}` is not accepted by value pattern `{pattern}`")]
    UnrecognizedToken { token: String, pattern: String },

    #[error("value pattern `{pattern}` does not compile: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl FuzzyError {
    pub(crate) fn grammar(input: &str, reason: impl Into<String>) -> Self {
        Self::GrammarError {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for distribution construction
pub type Result<T> = std::result::Result<T, FuzzyError>;
