//! Domain models for per-minute traffic profiles and analysis windows.
//!
//! This module provides the core data structures shared by the simulator and
//! the busy-hour analyzer: a fixed-length day profile in Erlangs, a normalized
//! intraday call-intensity distribution, and the clamped analysis window.

use serde::{Deserialize, Serialize};

/// Number of one-minute samples in a day profile.
pub const MINUTES_PER_DAY: usize = 1440;

/// Relative tolerance for treating an intensity distribution as normalized.
const NORMALIZATION_EPSILON: f64 = 1e-9;

/// Error type for domain-level invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("day profile must have {MINUTES_PER_DAY} values, got {0}")]
    ProfileLength(usize),

    #[error("intensity profile must have {MINUTES_PER_DAY} values, got {0}")]
    IntensityLength(usize),

    #[error("intensity profile mass must be positive, got sum = {0}")]
    NonPositiveMass(f64),
}

/// One day of traffic expressed as 1440 per-minute intensity values in Erlangs.
///
/// Values are always finite and non-negative: the constructor coerces NaN,
/// infinities and negative inputs to 0. Profiles are immutable once built.
///
/// # Examples
///
/// ```
/// use bha_rust::core::domain::{DayProfile, MINUTES_PER_DAY};
///
/// let profile = DayProfile::from_values(vec![0.5; MINUTES_PER_DAY]).unwrap();
/// assert_eq!(profile.values().len(), MINUTES_PER_DAY);
/// assert_eq!(profile.total_erlang_minutes(), 720.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProfile {
    values: Vec<f64>,
}

impl DayProfile {
    /// Builds a profile from exactly 1440 values, sanitizing each entry.
    pub fn from_values(values: Vec<f64>) -> Result<Self, DomainError> {
        if values.len() != MINUTES_PER_DAY {
            return Err(DomainError::ProfileLength(values.len()));
        }
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();
        Ok(Self { values })
    }

    /// Per-minute intensity values in Erlangs, indexed by minute of day.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum over all minutes (Erlang-minutes carried by this day).
    pub fn total_erlang_minutes(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Normalized per-minute-of-day call-intensity distribution.
///
/// Holds 1440 non-negative values summing to 1. Inputs whose sum is positive
/// but deviates from 1 by more than a small relative epsilon are renormalized;
/// a non-positive total is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityProfile {
    values: Vec<f64>,
}

impl IntensityProfile {
    /// Builds a distribution from 1440 raw weights, renormalizing if needed.
    pub fn from_values(values: Vec<f64>) -> Result<Self, DomainError> {
        if values.len() != MINUTES_PER_DAY {
            return Err(DomainError::IntensityLength(values.len()));
        }
        let mut values: Vec<f64> = values
            .into_iter()
            .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();
        let sum: f64 = values.iter().sum();
        if sum <= 0.0 {
            return Err(DomainError::NonPositiveMass(sum));
        }
        if (sum - 1.0).abs() > NORMALIZATION_EPSILON {
            for v in values.iter_mut() {
                *v /= sum;
            }
        }
        Ok(Self { values })
    }

    /// Uniform distribution: every minute carries mass `1/1440`.
    pub fn uniform() -> Self {
        Self {
            values: vec![1.0 / MINUTES_PER_DAY as f64; MINUTES_PER_DAY],
        }
    }

    /// Probability mass per minute of day.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Circular shift by `shift` minutes with wrap-around at midnight.
    ///
    /// The element at minute `i` moves to minute `(i + shift) mod 1440`, so a
    /// positive shift pushes the intraday shape later into the day. Rolling by
    /// `s` and then by `-s` reproduces the original distribution exactly.
    pub fn roll(&self, shift: i64) -> Self {
        let n = MINUTES_PER_DAY as i64;
        let mut rolled = vec![0.0; MINUTES_PER_DAY];
        for (i, &v) in self.values.iter().enumerate() {
            let target = (i as i64 + shift).rem_euclid(n) as usize;
            rolled[target] = v;
        }
        Self { values: rolled }
    }
}

/// Analysis time window derived from a `(start_hour, end_hour)` pair.
///
/// Hours are clamped to `[0, 24]`; an empty or inverted pair silently falls
/// back to the full day. The window carries both the minute range used by the
/// sliding-window search and the whole-hour range used by the clock-aligned
/// maximum.
///
/// # Examples
///
/// ```
/// use bha_rust::core::domain::AnalysisWindow;
///
/// let window = AnalysisWindow::from_hours(18.0, 6.0); // inverted -> full day
/// assert_eq!(window.minute_range(), 0..1440);
///
/// let window = AnalysisWindow::from_hours(8.0, 10.0);
/// assert_eq!(window.minute_range(), 480..600);
/// assert_eq!(window.hour_bins(), vec![8, 9]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWindow {
    start_hour: f64,
    end_hour: f64,
}

impl AnalysisWindow {
    pub fn from_hours(start_hour: f64, end_hour: f64) -> Self {
        if !start_hour.is_finite() || !end_hour.is_finite() {
            return Self {
                start_hour: 0.0,
                end_hour: 24.0,
            };
        }
        let start = start_hour.clamp(0.0, 24.0);
        let end = end_hour.clamp(0.0, 24.0);
        if start >= end {
            Self {
                start_hour: 0.0,
                end_hour: 24.0,
            }
        } else {
            Self {
                start_hour: start,
                end_hour: end,
            }
        }
    }

    /// Half-open minute-of-day range covered by this window.
    pub fn minute_range(&self) -> std::ops::Range<usize> {
        let start = (self.start_hour * 60.0) as usize;
        let end = ((self.end_hour * 60.0) as usize).min(MINUTES_PER_DAY);
        start..end
    }

    pub fn start_minute(&self) -> usize {
        self.minute_range().start
    }

    pub fn len_minutes(&self) -> usize {
        let range = self.minute_range();
        range.end - range.start
    }

    /// Whole clock hours fully addressed by the window (`floor(start)` up to
    /// but excluding `floor(end)`), restricted to valid hours of day.
    pub fn hour_bins(&self) -> Vec<usize> {
        let start = self.start_hour as usize;
        let end = self.end_hour as usize;
        (start..end).filter(|h| *h < 24).collect()
    }
}

/// Formats a minute-of-day as a wall-clock `HH:MM` label.
///
/// Minute 1440 maps to `24:00` so that a busy hour ending at midnight is
/// displayed the way traffic reports expect.
pub fn minute_to_label(minute: usize) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Formats the 60-minute busy hour starting at `start_minute` as
/// `"HH:MM - HH:MM"`.
pub fn busy_hour_label(start_minute: usize) -> String {
    format!(
        "{} - {}",
        minute_to_label(start_minute),
        minute_to_label(start_minute + 60)
    )
}
