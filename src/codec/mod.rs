//! Text form of distributions
//!
//! Operators describe a distribution as a comma separated list of entries,
//! optionally enclosed in brackets:
//!
//! ```text
//! 10%:100, 2:200, 300
//! ```
//!
//! - `10%:100`: value `100` is drawn with a fixed probability of 10%
//! - `2:200`: value `200` has weight 2 over the remaining mass
//! - `300`: no prefix, weight 1
//!
//! So `200` and `300` share the remaining 90% in a 2:1 ratio. Whitespace around
//! any element is ignored. Within an entry a `%` before the first `:` makes the
//! prefix a percentage; otherwise the prefix is a weight.
//!
//! The value part is handled by a [`ValueParser`]. Its regex pattern is used both
//! to check each token and to build [`Codec::allowed_pattern`], a regex for whole
//! specification strings that configuration layers can use to validate input
//! up front.
//!
//! # Example
//!
//! ```
//! use fuzzy::codec::{Codec, WordParser};
//!
//! let codec = Codec::new(WordParser)?;
//! let dist = codec.parse("30%:get, 1:put, 1:remove")?;
//! assert_eq!(codec.format(&dist), "[30.0%: get, 35.0%: put, 35.0%: remove]");
//! # Ok::<(), fuzzy::FuzzyError>(())
//! ```

pub mod parsers;

pub use parsers::{IntegerParser, SizeParser, ValueParser, WordParser};

use crate::distribution::probability::{from_percent, parse_decimal, Probability};
use crate::distribution::{Builder, DiscreteDistribution, Entry};
use crate::error::{FuzzyError, Result};
use num::traits::One;
use regex::Regex;
use std::fmt;

const NUMBER_PATTERN: &str = r"(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)";

/// Parser and formatter for one value type
#[derive(Debug, Clone)]
pub struct Codec<P> {
    parser: P,
    token: Regex,
    allowed: String,
    spec: Regex,
}

impl<P: ValueParser> Codec<P> {
    /// Create a codec around `parser`
    ///
    /// Fails with [`FuzzyError::InvalidPattern`] if the parser's pattern is not a
    /// valid regular expression.
    pub fn new(parser: P) -> Result<Self> {
        let pattern = parser.pattern().to_string();
        let compile = |re: &str| {
            Regex::new(re).map_err(|e| FuzzyError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        };

        let token = compile(&format!("^(?:{})$", pattern))?;
        let allowed = allowed_pattern_for(&pattern);
        let spec = compile(&format!("^(?:{})$", allowed))?;

        Ok(Self {
            parser,
            token,
            allowed,
            spec,
        })
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Regex describing every specification string this codec accepts
    pub fn allowed_pattern(&self) -> &str {
        &self.allowed
    }

    /// Quick syntactic check against [`allowed_pattern`](Self::allowed_pattern)
    ///
    /// A match does not guarantee [`parse`](Self::parse) succeeds: probabilities
    /// can still overflow and values can still be out of range.
    pub fn matches(&self, text: &str) -> bool {
        self.spec.is_match(text)
    }

    /// Parse a specification into a distribution
    pub fn parse(&self, text: &str) -> Result<DiscreteDistribution<P::Value>> {
        let entries = self.parse_entries(text)?;
        let count = entries.len();

        let mut builder = Builder::new();
        for entry in entries {
            builder.add(entry)?;
        }
        let dist = builder.create()?;

        tracing::debug!(spec = text, entries = count, "parsed distribution");
        Ok(dist)
    }

    /// Split a specification into tagged entries without normalizing them
    ///
    /// Percentages are already converted to probabilities. Weights and
    /// probabilities are range-checked later, when the entries reach a [`Builder`].
    pub fn parse_entries(&self, text: &str) -> Result<Vec<Entry<P::Value>>> {
        let body = strip_brackets(text)?;
        if body.trim().is_empty() {
            return Err(FuzzyError::EmptyDistribution);
        }

        body.split(',')
            .map(|part| self.parse_entry(text, part))
            .collect()
    }

    fn parse_entry(&self, input: &str, part: &str) -> Result<Entry<P::Value>> {
        let part = part.trim();
        if part.is_empty() {
            return Err(FuzzyError::grammar(input, "empty entry"));
        }

        let colon = match part.find(':') {
            Some(colon) => colon,
            None => {
                let value = self.parse_token(part)?;
                return Ok(Entry::weighted(value, Probability::one()));
            }
        };

        let token = part[colon + 1..].trim();
        if token.is_empty() {
            return Err(FuzzyError::grammar(
                input,
                format!("missing value after ':' in `{}`", part),
            ));
        }

        match part.find('%') {
            Some(percent) if percent < colon => {
                if !part[percent + 1..colon].trim().is_empty() {
                    return Err(FuzzyError::grammar(
                        input,
                        format!("unexpected text between '%' and ':' in `{}`", part),
                    ));
                }
                let percentage = parse_number(input, &part[..percent], "percentage")?;
                let value = self.parse_token(token)?;
                Ok(Entry::fixed(value, from_percent(&percentage)))
            }
            _ => {
                let weight = parse_number(input, &part[..colon], "weight")?;
                let value = self.parse_token(token)?;
                Ok(Entry::weighted(value, weight))
            }
        }
    }

    fn parse_token(&self, token: &str) -> Result<P::Value> {
        let unrecognized = || FuzzyError::UnrecognizedToken {
            token: token.to_string(),
            pattern: self.parser.pattern().to_string(),
        };

        if !self.token.is_match(token) {
            return Err(unrecognized());
        }
        self.parser.parse(token).ok_or_else(unrecognized)
    }
}

impl<P> Codec<P> {
    /// Render a distribution as `[p1%: v1, p2%: v2, ...]`
    ///
    /// Percentages are rounded to one decimal and always add up to 100, so the
    /// output parses back with marginals within 0.1 percentage points of the
    /// original. An entry too small to show at one decimal renders as `0.0%`,
    /// which does not parse back.
    pub fn format<T: fmt::Display>(&self, dist: &DiscreteDistribution<T>) -> String {
        dist.to_string()
    }
}

fn strip_brackets(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    match (trimmed.starts_with('['), trimmed.ends_with(']')) {
        (true, true) if trimmed.len() >= 2 => Ok(&trimmed[1..trimmed.len() - 1]),
        (false, false) => Ok(trimmed),
        _ => Err(FuzzyError::grammar(text, "unbalanced brackets")),
    }
}

fn parse_number(input: &str, text: &str, what: &str) -> Result<Probability> {
    parse_decimal(text).ok_or_else(|| {
        FuzzyError::grammar(input, format!("invalid {} `{}`", what, text.trim()))
    })
}

fn allowed_pattern_for(token: &str) -> String {
    let entry = format!(r"\s*(?:{}\s*%?\s*:\s*)?(?:{})\s*", NUMBER_PATTERN, token);
    format!(r"\s*\[?{entry}(?:,{entry})*\]?\s*", entry = entry)
}
