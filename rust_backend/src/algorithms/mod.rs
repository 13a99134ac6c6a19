//! Traffic simulation and busy-hour analytics.
//!
//! # Components
//!
//! - [`simulation`]: stochastic multi-day traffic synthesis from empirical
//!   holding-time and call-intensity distributions
//! - [`busy_hour`]: sliding-window busy-hour metrics over a population of
//!   day profiles
//!
//! # Example
//!
//! ```
//! use bha_rust::algorithms::{BusyHourAnalyzer, SimulationOptions, TrafficSimulator};
//! use bha_rust::core::{IntensityProfile, ProfileStore};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let simulator = TrafficSimulator::new(SimulationOptions {
//!     day_count: 5,
//!     ..SimulationOptions::default()
//! });
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = simulator
//!     .simulate(&[120.0, 180.0, 95.0], &IntensityProfile::uniform(), &mut rng)
//!     .unwrap();
//!
//! let mut store = ProfileStore::new();
//! store.replace(&outcome.into_profiles());
//! let result = BusyHourAnalyzer::analyze(store.matrix(), 0.0, 24.0).unwrap();
//! assert_eq!(result.day_count, 6);
//! ```

pub mod busy_hour;
pub mod simulation;

pub use busy_hour::{AnalysisResult, BusyHourAnalyzer, BUSY_HOUR_MINUTES};
pub use simulation::{SimulationOptions, SimulationOutcome, TrafficSimulator};
