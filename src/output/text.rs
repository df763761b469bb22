//! Human-readable text output

use crate::config::AnyDistribution;
use crate::stats::SampleReport;

/// Print a distribution with its marginal and cumulative table
pub fn print_distribution(name: &str, dist: &AnyDistribution) {
    println!("{} ({}, {} entries)", name, dist.kind(), dist.len());
    println!("  {}", dist);
    println!();
    println!("  {:<24} {:>10} {:>12}", "Value", "Marginal", "Cumulative");
    for (value, marginal, cumulative) in dist.table() {
        println!("  {:<24} {:>9}% {:>11}%", value, marginal, cumulative);
    }
}

/// Print observed vs. expected frequencies
pub fn print_report(report: &SampleReport) {
    println!("Samples: {}", format_number(report.samples));
    println!();
    println!(
        "  {:<24} {:>10} {:>10} {:>12}",
        "Value", "Expected", "Observed", "Count"
    );
    for row in &report.rows {
        println!(
            "  {:<24} {:>9.2}% {:>9.2}% {:>12}",
            row.value,
            row.expected_percent,
            row.observed_percent,
            format_number(row.count)
        );
    }
    println!();
    println!("Max deviation: {:.3} percentage points", report.max_deviation());
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
