//! Parser for raw call holding-time measurements.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::parse_decimal;

/// Reads a holding-time file: one duration in seconds per line.
///
/// Malformed or non-positive records are skipped; the file is rejected only
/// when it yields no usable duration at all.
pub fn parse_file(path: &Path) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read holding-time file {}", path.display()))?;

    let durations = parse_str(&content);
    if durations.is_empty() {
        bail!(
            "No usable holding-time records in {}",
            path.display()
        );
    }
    Ok(durations)
}

/// Parses holding-time records from already-loaded text.
pub fn parse_str(content: &str) -> Vec<f64> {
    let mut durations = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_decimal(trimmed) {
            Some(seconds) if seconds > 0.0 => durations.push(seconds),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed holding-time records", skipped);
    }
    durations
}
