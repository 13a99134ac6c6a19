//! Core domain types for traffic profiles and their storage.

pub mod domain;
pub mod store;

pub use domain::{AnalysisWindow, DayProfile, DomainError, IntensityProfile, MINUTES_PER_DAY};
pub use store::ProfileStore;
