//! Engine orchestrating the two ingestion paths and the busy-hour analysis.
//!
//! The engine owns the profile population and exposes the workflow the
//! frontends drive: load data (simulated or measured), analyze, export.
//! Failed loads never disturb an already-loaded population; inputs are
//! validated and parsed in full before the store is touched.

use chrono::{DateTime, Utc};
use ndarray::ArrayView2;
use polars::prelude::DataFrame;
use rand::Rng;
use std::path::Path;

use crate::algorithms::{
    AnalysisResult, BusyHourAnalyzer, SimulationOptions, TrafficSimulator,
};
use crate::core::ProfileStore;
use crate::io::{DistributionLoader, ProfileFolderLoader};
use crate::parsing::day_profile;

use super::error::{EngineError, EngineResult};

/// Outcome of a successful load, for reporting to the user.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Number of day profiles now held by the engine.
    pub day_count: usize,
    /// Files skipped during folder ingestion; always 0 for simulation.
    pub skipped_files: usize,
    /// When the load completed.
    pub loaded_at: DateTime<Utc>,
}

/// Stateful analysis engine holding the current day-profile population.
#[derive(Default)]
pub struct TrafficEngine {
    store: ProfileStore,
}

impl TrafficEngine {
    pub fn new() -> Self {
        Self {
            store: ProfileStore::new(),
        }
    }

    /// Simulates a population of day profiles from the two distribution files.
    ///
    /// Both files are checked and parsed before the current population is
    /// replaced, so a bad input leaves the engine unchanged.
    pub fn load_and_simulate<R: Rng + ?Sized>(
        &mut self,
        holding_path: &Path,
        intensity_path: &Path,
        options: SimulationOptions,
        rng: &mut R,
    ) -> EngineResult<LoadSummary> {
        if !holding_path.is_file() {
            return Err(EngineError::InputMissing(holding_path.to_path_buf()));
        }
        if !intensity_path.is_file() {
            return Err(EngineError::InputMissing(intensity_path.to_path_buf()));
        }

        let inputs = DistributionLoader::load(holding_path, intensity_path)?;
        let simulator = TrafficSimulator::new(options);
        let outcome = simulator
            .simulate(&inputs.holding_times, &inputs.intensity, rng)
            .map_err(|e| EngineError::InvalidInput(format!("{:#}", e)))?;

        let profiles = outcome.into_profiles();
        self.store.replace(&profiles);
        log::info!("Simulated population of {} day profiles", profiles.len());

        Ok(LoadSummary {
            day_count: self.store.day_count(),
            skipped_files: 0,
            loaded_at: Utc::now(),
        })
    }

    /// Replaces the population with measured day profiles from a folder of
    /// CSV files.
    pub fn load_folder(&mut self, dir: &Path) -> EngineResult<LoadSummary> {
        if !dir.is_dir() {
            return Err(EngineError::InputMissing(dir.to_path_buf()));
        }

        let loaded = ProfileFolderLoader::load_folder(dir)?;
        self.store.replace(&loaded.profiles);

        Ok(LoadSummary {
            day_count: self.store.day_count(),
            skipped_files: loaded.skipped_files,
            loaded_at: loaded.loaded_at,
        })
    }

    /// Runs the busy-hour analysis over the current population.
    ///
    /// Returns `None` when no data is loaded or the window is shorter than
    /// one hour.
    pub fn analyze(&self, start_hour: f64, end_hour: f64) -> Option<AnalysisResult> {
        BusyHourAnalyzer::analyze(self.store.matrix(), start_hour, end_hour)
    }

    /// Drops the current population.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn day_count(&self) -> usize {
        self.store.day_count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Minute x day view of the population.
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.store.matrix()
    }

    /// Exports the population as a tabular frame, one `day_N` column per day.
    pub fn export_dataframe(&self) -> EngineResult<DataFrame> {
        if self.store.is_empty() {
            return Err(EngineError::NoUsableData(
                "No day profiles loaded".to_string(),
            ));
        }
        day_profile::matrix_to_dataframe(self.store.matrix())
            .map_err(|e| EngineError::Internal(format!("{:#}", e)))
    }
}
