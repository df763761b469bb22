//! Exact probability arithmetic
//!
//! Probabilities and weights are kept as [`BigRational`] so that the cumulative
//! table of a distribution ends at exactly one and boundary comparisons are exact.
//! Floating point only appears at the edges: the uniform draw coming from the
//! random source and the percentages printed in reports.

use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::{One, Signed, ToPrimitive, Zero};

/// Exact probability or weight
pub type Probability = BigRational;

/// Parse a plain decimal number such as `12`, `0.25`, `.5` or `-3`
///
/// Exponents are not accepted. Returns `None` for anything else.
pub fn parse_decimal(text: &str) -> Option<Probability> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let numer: BigInt = format!("{}{}", int_part, frac_part).parse().ok()?;
    let denom = num::pow(BigInt::from(10u32), frac_part.len());
    let value = BigRational::new(numer, denom);

    Some(if negative { -value } else { value })
}

/// Shorthand for `numer / denom`
///
/// # Panics
///
/// Panics if `denom` is zero.
pub fn ratio(numer: i64, denom: i64) -> Probability {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Convert a percentage (`12.5` meaning 12.5%) into a probability
pub fn from_percent(percent: &Probability) -> Probability {
    percent / BigRational::from_integer(BigInt::from(100u32))
}

/// Render a probability as `NN.N` percent, rounded half-up to one fractional digit
pub fn format_percent(probability: &Probability) -> String {
    let tenths = (probability * per_mille()).round().to_integer();
    format_tenths(&tenths)
}

/// Render marginal probabilities as one-decimal percentages that add up exactly
///
/// Every part is rounded down to a tenth of a percent, then the tenths still
/// missing from the exact total go to the parts with the largest remainders
/// (earlier parts first on ties). Each result is within 0.1 of the exact
/// percentage, and a set of marginals summing to 1 renders as exactly `100.0`.
pub fn apportion_percent(parts: &[Probability]) -> Vec<String> {
    let scaled: Vec<BigRational> = parts.iter().map(|p| p * per_mille()).collect();
    let mut tenths: Vec<BigInt> = scaled.iter().map(|s| s.floor().to_integer()).collect();

    let total: BigRational = parts.iter().sum();
    let target = (total * per_mille()).round().to_integer();
    let assigned: BigInt = tenths.iter().sum();
    let missing = (target - assigned).to_usize().unwrap_or(0);

    let mut order: Vec<usize> = (0..parts.len()).collect();
    order.sort_by(|&a, &b| scaled[b].fract().cmp(&scaled[a].fract()));
    for &i in order.iter().take(missing) {
        tenths[i] += 1u32;
    }

    tenths.iter().map(format_tenths).collect()
}

fn per_mille() -> BigRational {
    BigRational::from_integer(BigInt::from(1000u32))
}

fn format_tenths(tenths: &BigInt) -> String {
    let sign = if tenths.is_negative() { "-" } else { "" };
    let tenths = tenths.abs();
    format!("{}{}.{}", sign, &tenths / 10u32, &tenths % 10u32)
}

/// Render an exact value for diagnostics
///
/// Terminating decimals print as decimals (`0.35`), anything else as `n/d`.
pub fn format_ratio(value: &Probability) -> String {
    if value.is_integer() {
        return value.to_integer().to_string();
    }

    let ten = BigRational::from_integer(BigInt::from(10u32));
    let mut scaled = value.abs();
    let mut digits = 0usize;
    while !scaled.is_integer() && digits < 18 {
        scaled = scaled * &ten;
        digits += 1;
    }
    if !scaled.is_integer() {
        return format!("{}/{}", value.numer(), value.denom());
    }

    let raw = scaled.to_integer().to_string();
    let padded = format!("{:0>width$}", raw, width = digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - digits);
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, int_part, frac_part)
}

/// Lossy conversion for reporting
pub fn to_f64(value: &Probability) -> f64 {
    match (value.numer().to_f64(), value.denom().to_f64()) {
        (Some(n), Some(d)) if d != 0.0 => n / d,
        _ => f64::NAN,
    }
}

/// Exact rational image of a uniform draw
///
/// Non-finite draws map to zero.
pub fn from_draw(x: f64) -> Probability {
    BigRational::from_float(x).unwrap_or_else(BigRational::zero)
}

/// Smallest `f64` that is not below `p`
///
/// For every float `x`, `p <= x` holds exactly when `draw_threshold(p) <= x`, so a
/// sampler can search a float table and keep the exact tie-break. `p` must be
/// non-negative and at most 1.
pub fn draw_threshold(p: &Probability) -> f64 {
    let mut t = to_f64(p);
    if !t.is_finite() || t < 0.0 {
        t = 0.0;
    }
    while from_draw(t) < *p {
        t = next_float_up(t);
    }
    while t > 0.0 && from_draw(next_float_down(t)) >= *p {
        t = next_float_down(t);
    }
    t
}

// Both helpers assume a non-negative finite input.
fn next_float_up(t: f64) -> f64 {
    f64::from_bits(t.to_bits() + 1)
}

fn next_float_down(t: f64) -> f64 {
    f64::from_bits(t.to_bits() - 1)
}

/// `true` if `p` lies in (0, 1]
pub fn is_valid_probability(p: &Probability) -> bool {
    p.is_positive() && *p <= BigRational::one()
}
