//! Parser for the intraday call-intensity distribution file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::domain::{IntensityProfile, MINUTES_PER_DAY};

use super::parse_decimal;

/// Reads an intensity file: whitespace-delimited `(minute 1..=1440, weight)`
/// rows, with either dot or comma decimal separators.
///
/// Minutes absent from the file default to weight 0. Rows with an invalid
/// minute or weight are skipped. The resulting 1440-length vector is
/// renormalized to sum to 1 when its positive total deviates from 1.
pub fn parse_file(path: &Path) -> Result<IntensityProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read intensity file {}", path.display()))?;
    parse_str(&content)
        .with_context(|| format!("No usable intensity distribution in {}", path.display()))
}

/// Parses the intensity distribution from already-loaded text.
pub fn parse_str(content: &str) -> Result<IntensityProfile> {
    let mut weights = vec![0.0; MINUTES_PER_DAY];
    let mut skipped = 0usize;

    for line in content.lines() {
        let mut tokens = line.split_whitespace();
        let (Some(minute_token), Some(weight_token)) = (tokens.next(), tokens.next()) else {
            if !line.trim().is_empty() {
                skipped += 1;
            }
            continue;
        };

        let minute: usize = match minute_token.parse() {
            Ok(m) if (1..=MINUTES_PER_DAY).contains(&m) => m,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let Some(weight) = parse_decimal(weight_token) else {
            skipped += 1;
            continue;
        };

        // File minutes are 1-based.
        weights[minute - 1] = weight;
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed intensity records", skipped);
    }
    Ok(IntensityProfile::from_values(weights)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_fills_missing_minutes_with_zero() {
        let profile = parse_str("1 0.5\n720 0,5\n").unwrap();
        assert_eq!(profile.values()[0], 0.5);
        assert_eq!(profile.values()[719], 0.5);
        assert_eq!(profile.values()[1], 0.0);
    }

    #[test]
    fn test_parse_str_renormalizes_positive_sum() {
        let profile = parse_str("1 1\n2 1\n").unwrap();
        assert_eq!(profile.values()[0], 0.5);
        assert_eq!(profile.values()[1], 0.5);
        let sum: f64 = profile.values().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_str_skips_bad_rows() {
        let profile = parse_str("0 0.3\n2000 0.3\nfoo bar\n5 0.25\n6 0.75\n").unwrap();
        // Only minutes 5 and 6 survive; the distribution already sums to 1.
        assert_eq!(profile.values()[4], 0.25);
        assert_eq!(profile.values()[5], 0.75);
    }

    #[test]
    fn test_parse_str_rejects_all_zero_input() {
        assert!(parse_str("").is_err());
        assert!(parse_str("1 0\n2 0\n").is_err());
    }
}
