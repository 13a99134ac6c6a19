//! Busy-hour traffic analysis backend.
//!
//! Simulates or ingests populations of 1440-minute voice-traffic day
//! profiles and computes the standard busy-hour engineering metrics
//! (TCBH, ADPH, FDMH) with a Student-t confidence margin.

pub mod algorithms;
pub mod core;
pub mod io;
pub mod parsing;
pub mod services;
