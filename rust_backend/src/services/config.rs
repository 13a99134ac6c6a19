//! Application configuration file support.
//!
//! Reads engine settings from TOML configuration files. Every field is
//! optional; omitted values fall back to the defaults used by the
//! interactive workflow (31 simulated days, 5% volume variation, a
//! +/- 2 hour profile shift and a full-day analysis window).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithms::SimulationOptions;

use super::error::{EngineError, EngineResult};

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Input file locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    /// Holding-time distribution file, one duration in seconds per line.
    #[serde(default)]
    pub holding_times: String,
    /// Intraday call-intensity distribution file, `minute weight` rows.
    #[serde(default)]
    pub intensity: String,
    /// Folder of measured day-profile CSV files.
    #[serde(default)]
    pub profile_folder: String,
}

/// Stochastic simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_day_count")]
    pub day_count: usize,
    #[serde(default = "default_volume_cv")]
    pub volume_cv: f64,
    #[serde(default = "default_max_shift_minutes")]
    pub max_shift_minutes: i64,
    /// Optional seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Analysis window settings, in fractional hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_start_hour")]
    pub start_hour: f64,
    #[serde(default = "default_end_hour")]
    pub end_hour: f64,
}

fn default_day_count() -> usize {
    31
}

fn default_volume_cv() -> f64 {
    0.05
}

fn default_max_shift_minutes() -> i64 {
    120
}

fn default_start_hour() -> f64 {
    0.0
}

fn default_end_hour() -> f64 {
    24.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            day_count: default_day_count(),
            volume_cv: default_volume_cv(),
            max_shift_minutes: default_max_shift_minutes(),
            seed: None,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl From<&SimulationSettings> for SimulationOptions {
    fn from(settings: &SimulationSettings) -> Self {
        SimulationOptions {
            day_count: settings.day_count,
            volume_cv: settings.volume_cv,
            max_shift_minutes: settings.max_shift_minutes,
        }
    }
}

impl AppConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            EngineError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }
}
