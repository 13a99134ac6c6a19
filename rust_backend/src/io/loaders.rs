//! Loaders for the two ingestion paths of the engine.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::core::domain::{DayProfile, IntensityProfile};
use crate::parsing::{day_profile, holding_times, intensity};

/// Raw empirical inputs for a simulation run.
#[derive(Debug, Clone)]
pub struct DistributionInputs {
    /// Call holding times in seconds, one per observed call.
    pub holding_times: Vec<f64>,
    /// Normalized intraday call-intensity distribution.
    pub intensity: IntensityProfile,
}

/// Loads the pair of raw distribution files consumed by the simulator.
pub struct DistributionLoader;

impl DistributionLoader {
    /// Parses the holding-time and intensity files.
    ///
    /// The caller is expected to have checked that both paths exist; this
    /// only adds parse-level error context.
    pub fn load(holding_path: &Path, intensity_path: &Path) -> Result<DistributionInputs> {
        let holding_times = holding_times::parse_file(holding_path)
            .context("Failed to load the holding-time distribution")?;
        let intensity = intensity::parse_file(intensity_path)
            .context("Failed to load the call-intensity distribution")?;

        log::info!(
            "Loaded {} holding-time records and the intraday intensity distribution",
            holding_times.len()
        );
        Ok(DistributionInputs {
            holding_times,
            intensity,
        })
    }
}

/// Result of ingesting a folder of day-profile files.
#[derive(Debug)]
pub struct ProfileLoadResult {
    /// Successfully parsed profiles, in directory iteration order.
    pub profiles: Vec<DayProfile>,
    /// Number of files that yielded no usable traffic column.
    pub skipped_files: usize,
    /// When the ingestion completed.
    pub loaded_at: DateTime<Utc>,
}

/// Loads every usable day-profile CSV found in a folder.
pub struct ProfileFolderLoader;

impl ProfileFolderLoader {
    /// Scans `dir` for `.csv` files and parses each into a day profile.
    ///
    /// Files that fail to parse are skipped with a warning; at least one
    /// usable file is required for success.
    pub fn load_folder(dir: &Path) -> Result<ProfileLoadResult> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read folder {}", dir.display()))?;

        let mut csv_paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        csv_paths.sort();

        if csv_paths.is_empty() {
            bail!("No CSV files in folder {}", dir.display());
        }

        let mut profiles = Vec::new();
        let mut skipped_files = 0usize;
        for path in &csv_paths {
            match day_profile::parse_file(path) {
                Ok(profile) => profiles.push(profile),
                Err(err) => {
                    log::warn!("Skipping {}: {:#}", path.display(), err);
                    skipped_files += 1;
                }
            }
        }

        if profiles.is_empty() {
            bail!("No usable CSV files in folder {}", dir.display());
        }

        log::info!(
            "Loaded {} day profiles from {} ({} skipped)",
            profiles.len(),
            dir.display(),
            skipped_files
        );
        Ok(ProfileLoadResult {
            profiles,
            skipped_files,
            loaded_at: Utc::now(),
        })
    }
}
