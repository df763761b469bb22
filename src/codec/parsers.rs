//! Value parsers for distribution tokens
//!
//! A [`ValueParser`] turns the value part of a distribution entry (`4k` in
//! `30%:4k`) into a typed value, and declares the regular expression a token must
//! match before it is handed over.

/// Per-type token parser
pub trait ValueParser {
    type Value;

    /// Regular expression a whole token must match (anchoring is added by the codec)
    fn pattern(&self) -> &str;

    /// Parse a trimmed token that already matched [`pattern`](Self::pattern)
    ///
    /// Returns `None` if the token matches the pattern but is still not a valid
    /// value, e.g. an integer that overflows.
    fn parse(&self, token: &str) -> Option<Self::Value>;
}

impl<P: ValueParser + ?Sized> ValueParser for &P {
    type Value = P::Value;

    fn pattern(&self) -> &str {
        (**self).pattern()
    }

    fn parse(&self, token: &str) -> Option<Self::Value> {
        (**self).parse(token)
    }
}

/// Non-negative decimal integers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerParser;

impl ValueParser for IntegerParser {
    type Value = u64;

    fn pattern(&self) -> &str {
        "[0-9]+"
    }

    fn parse(&self, token: &str) -> Option<u64> {
        token.parse().ok()
    }
}

/// Byte sizes with optional binary suffix: `512`, `4k`, `64KB`, `1M`, `2g`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeParser;

impl ValueParser for SizeParser {
    type Value = u64;

    fn pattern(&self) -> &str {
        "[0-9]+(?:[kKmMgGtT][bB]?)?"
    }

    fn parse(&self, token: &str) -> Option<u64> {
        let s = token.trim().to_lowercase();
        let s = s.strip_suffix('b').unwrap_or(&s);

        let (num_str, multiplier) = match s.chars().last() {
            Some('k') => (&s[..s.len() - 1], 1024u64),
            Some('m') => (&s[..s.len() - 1], 1024 * 1024),
            Some('g') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
            Some('t') => (&s[..s.len() - 1], 1024 * 1024 * 1024 * 1024),
            _ => (s, 1),
        };

        num_str.parse::<u64>().ok()?.checked_mul(multiplier)
    }
}

/// Identifiers such as operation names: `get`, `put_if_absent`, `query.v2`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordParser;

impl ValueParser for WordParser {
    type Value = String;

    fn pattern(&self) -> &str {
        "[A-Za-z_][A-Za-z0-9_.-]*"
    }

    fn parse(&self, token: &str) -> Option<String> {
        Some(token.to_string())
    }
}
