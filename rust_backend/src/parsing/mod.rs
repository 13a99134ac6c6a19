//! Parsers for the raw traffic-measurement input formats.
//!
//! Three formats feed the engine:
//!
//! - [`holding_times`]: one call holding time (seconds) per line
//! - [`intensity`]: whitespace-delimited `(minute-of-day, weight)` pairs
//! - [`day_profile`]: CSV files with one pre-recorded day profile each
//!
//! All parsers recover from malformed records by skipping them; only a total
//! absence of usable data is reported as an error.

pub mod day_profile;
pub mod holding_times;
pub mod intensity;


/// Parses a decimal number, tolerating a comma as the decimal separator.
///
/// Returns `None` for anything that does not parse to a finite value.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
