//! Busy-hour metrics over a population of day profiles.
//!
//! Reduces the minute × day sample matrix to the four headline engineering
//! metrics: the time-consistent busy hour (TCBH) found by sliding-window
//! search over the cross-day mean curve, the average of daily peak hours
//! (ADPH), the clock-aligned fixed-hour maximum (FDMH), and the 95%
//! Student-t confidence half-width of the TCBH estimate.

use ndarray::{s, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::core::domain::{busy_hour_label, AnalysisWindow, MINUTES_PER_DAY};

/// Length of the busy-hour search window in minutes.
pub const BUSY_HOUR_MINUTES: usize = 60;

/// Headline metrics of one analysis pass.
///
/// All intensity values are in the same unit as the input profiles (Erlangs)
/// and are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of days in the analyzed population.
    pub day_count: usize,
    /// Mean intensity of the time-consistent busy hour.
    pub tcbh_erl: f64,
    /// Minute of day at which the detected busy hour starts.
    pub tcbh_start_minute: usize,
    /// Wall-clock label of the busy hour, `"HH:MM - HH:MM"`.
    pub tcbh_label: String,
    /// Average of each day's own peak-hour intensity.
    pub adph_erl: f64,
    /// Highest clock-aligned hourly mean within the window.
    pub fdmh_erl: f64,
    /// Upper half-width of the 95% confidence interval around the TCBH.
    pub confidence_margin_erl: f64,
}

impl AnalysisResult {
    /// Confidence margin expressed as a percentage of the TCBH value.
    pub fn margin_percent(&self) -> f64 {
        if self.tcbh_erl > 0.0 {
            self.confidence_margin_erl / self.tcbh_erl * 100.0
        } else {
            0.0
        }
    }
}

/// Sliding-window busy-hour estimator.
pub struct BusyHourAnalyzer;

impl BusyHourAnalyzer {
    /// Analyzes a minute × day sample matrix over `[start_hour, end_hour)`.
    ///
    /// Invalid or inverted bounds fall back to the full day. Returns `None`
    /// when the matrix holds no days, has the wrong number of rows, or the
    /// clamped window spans fewer than 60 minutes — an explicit "no result"
    /// state rather than an error.
    pub fn analyze(
        matrix: ArrayView2<'_, f64>,
        start_hour: f64,
        end_hour: f64,
    ) -> Option<AnalysisResult> {
        let day_count = matrix.ncols();
        if day_count == 0 || matrix.nrows() != MINUTES_PER_DAY {
            return None;
        }

        let window = AnalysisWindow::from_hours(start_hour, end_hour);
        if window.len_minutes() < BUSY_HOUR_MINUTES {
            return None;
        }
        let minute_range = window.minute_range();

        let mean_profile = matrix.mean_axis(Axis(1))?;

        // TCBH: first index attaining the maximum of the windowed moving
        // average over the cross-day mean curve.
        let windowed = mean_profile
            .slice(s![minute_range.clone()])
            .to_vec();
        let sliding = moving_average(&windowed, BUSY_HOUR_MINUTES);
        let (local_index, tcbh_erl) = argmax_first(&sliding)?;
        let tcbh_start_minute = minute_range.start + local_index;

        // ADPH: each day is allowed its own peak location.
        let mut daily_peaks = Vec::with_capacity(day_count);
        for day in 0..day_count {
            let day_curve = matrix.slice(s![minute_range.clone(), day]).to_vec();
            let day_sliding = moving_average(&day_curve, BUSY_HOUR_MINUTES);
            let peak = argmax_first(&day_sliding).map(|(_, v)| v).unwrap_or(0.0);
            daily_peaks.push(peak);
        }
        let adph_erl = daily_peaks.iter().sum::<f64>() / day_count as f64;

        // FDMH: clock-aligned hour bins of the full-day mean curve,
        // restricted to whole hours inside the window.
        let fdmh_erl = window
            .hour_bins()
            .into_iter()
            .map(|hour| {
                mean_profile
                    .slice(s![hour * 60..(hour + 1) * 60])
                    .mean()
                    .unwrap_or(0.0)
            })
            .fold(None, |best: Option<f64>, v| {
                Some(best.map_or(v, |b| b.max(v)))
            })
            .unwrap_or(0.0);

        // Confidence interval over per-day means of the located TCBH span —
        // the same absolute minute span for every day.
        let tcbh_span = matrix.slice(s![
            tcbh_start_minute..tcbh_start_minute + BUSY_HOUR_MINUTES,
            ..
        ]);
        let day_means: Vec<f64> = (0..day_count)
            .map(|day| tcbh_span.column(day).mean().unwrap_or(0.0))
            .collect();
        let confidence_margin_erl = confidence_margin(&day_means);

        Some(AnalysisResult {
            day_count,
            tcbh_erl,
            tcbh_start_minute,
            tcbh_label: busy_hour_label(tcbh_start_minute),
            adph_erl,
            fdmh_erl,
            confidence_margin_erl,
        })
    }
}

/// Simple moving average over fully-contained windows only.
///
/// The output has length `values.len() - window + 1`; no wraparound and no
/// partial windows at the boundary.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    out.push(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out.push(sum / window as f64);
    }
    out
}

/// Index and value of the first occurrence of the maximum.
fn argmax_first(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        // Strict comparison keeps the earliest index on ties.
        if best.is_none_or(|(_, current)| value > current) {
            best = Some((index, value));
        }
    }
    best
}

/// Upper half-width of the two-sided 95% Student-t interval for the mean of
/// `day_means`, or 0 when dispersion is undefined (`n <= 1`).
fn confidence_margin(day_means: &[f64]) -> f64 {
    let n = day_means.len();
    if n <= 1 {
        return 0.0;
    }
    let n_f = n as f64;
    let mean = day_means.iter().sum::<f64>() / n_f;
    // Bessel-corrected sample variance.
    let variance = day_means.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
    if !variance.is_finite() || variance <= 0.0 {
        return 0.0;
    }
    let standard_error = variance.sqrt() / n_f.sqrt();

    match StudentsT::new(0.0, 1.0, n_f - 1.0) {
        Ok(t_dist) => {
            let quantile = t_dist.inverse_cdf(0.975);
            let margin = quantile * standard_error;
            if margin.is_finite() && margin > 0.0 {
                margin
            } else {
                0.0
            }
        }
        Err(_) => 0.0,
    }
}
