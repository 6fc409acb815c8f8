//! Common types and constants shared by every part of the memory unit.
//!
//! This module provides:
//! 1. **Constants:** The fixed memory map and architectural values.
//! 2. **Access descriptors:** Byte enables, destinations and load values.
//! 3. **Error Handling:** Access, configuration, load and simulation errors.

/// Memory map and architectural constants.
pub mod constants;

/// Byte enables, destinations and load values.
pub mod data;

/// Error types.
pub mod error;

pub use data::{AccessType, AccessWidth, ByteEnable, Destination, LanePattern, LoadValue};
pub use error::{AccessError, ConfigError, LoadError, SimError};
