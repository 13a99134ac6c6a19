//! Service layer for business logic and orchestration.
//!
//! This module contains the engine that ties ingestion, simulation and
//! analysis together, its error taxonomy, and the TOML configuration
//! surface used by the command-line frontend.

pub mod config;
pub mod engine;
pub mod error;

#[cfg(test)]
mod engine_tests;

pub use config::{AnalysisSettings, AppConfig, InputSettings, SimulationSettings};
pub use engine::{LoadSummary, TrafficEngine};
pub use error::{EngineError, EngineResult};
