//! High-level data loading utilities.
//!
//! Loaders combine the format parsers with filesystem traversal and error
//! context: one for the pair of raw distribution files feeding the simulator,
//! one for folders of pre-recorded day-profile CSVs.

pub mod loaders;


pub use loaders::{DistributionInputs, DistributionLoader, ProfileFolderLoader, ProfileLoadResult};
