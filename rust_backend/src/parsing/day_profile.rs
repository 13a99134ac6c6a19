//! CSV parser and exporter for pre-recorded day-profile files.

use anyhow::{bail, Context, Result};
use ndarray::ArrayView2;
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::{DayProfile, MINUTES_PER_DAY};

use super::parse_decimal;

/// Column holding per-minute traffic intensity in Erlangs.
pub const TRAFFIC_COLUMN: &str = "traffic_erl";

/// Column holding the 1-based minute-of-day index.
pub const MINUTE_COLUMN: &str = "minute";

/// Parses one day-profile CSV file.
///
/// Files may be semicolon- or comma-delimited; a [`TRAFFIC_COLUMN`] column is
/// required. String values tolerate comma decimal separators and non-numeric
/// entries become 0. Profiles longer than 1440 rows are truncated, shorter
/// ones are zero-padded to exactly 1440.
pub fn parse_file(path: &Path) -> Result<DayProfile> {
    let df = read_csv(path, b';')?;
    let df = if df.column(TRAFFIC_COLUMN).is_ok() {
        df
    } else {
        read_csv(path, b',')?
    };
    dataframe_to_profile(&df)
        .with_context(|| format!("No usable traffic column in {}", path.display()))
}

fn read_csv(path: &Path, separator: u8) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_ignore_errors(true)
        .map_parse_options(|parse_options| parse_options.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse CSV file {}", path.display()))
}

/// Extracts the traffic column of a parsed DataFrame as a [`DayProfile`].
pub fn dataframe_to_profile(df: &DataFrame) -> Result<DayProfile> {
    let column = df
        .column(TRAFFIC_COLUMN)
        .with_context(|| format!("Missing required column '{}'", TRAFFIC_COLUMN))?;

    // String columns may carry comma decimals; anything else is coerced to
    // Float64 with unparseable entries becoming null, then 0.
    let mut values: Vec<f64> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_decimal).unwrap_or(0.0))
            .collect(),
        _ => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect(),
    };

    values.truncate(MINUTES_PER_DAY);
    values.resize(MINUTES_PER_DAY, 0.0);
    Ok(DayProfile::from_values(values)?)
}

/// Exports the minute × day sample matrix as a DataFrame for the plotting
/// frontend: a 1-based minute column plus one `day_N` column per day.
pub fn matrix_to_dataframe(matrix: ArrayView2<'_, f64>) -> Result<DataFrame> {
    if matrix.nrows() != MINUTES_PER_DAY {
        bail!(
            "Sample matrix must have {} rows, got {}",
            MINUTES_PER_DAY,
            matrix.nrows()
        );
    }

    let minutes: Vec<u32> = (1..=MINUTES_PER_DAY as u32).collect();
    let mut columns: Vec<Column> = vec![Column::new(MINUTE_COLUMN.into(), minutes)];
    for day in 0..matrix.ncols() {
        let values: Vec<f64> = matrix.column(day).to_vec();
        columns.push(Column::new(format!("day_{}", day + 1).into(), values));
    }

    Ok(DataFrame::new(columns)?)
}
