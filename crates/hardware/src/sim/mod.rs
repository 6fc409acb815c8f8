//! Simulation driver, program loading and request traces.
//!
//! Provides utilities for loading program images, parsing request traces,
//! and the `Simulator` that steps the memory unit against its collaborators.

/// Program image loading (flat and ELF).
pub mod loader;

/// Simulator owning the unit, the system and statistics.
pub mod simulator;

/// JSON request traces.
pub mod trace;

pub use simulator::{CycleRecord, Simulator, TraceRun};
