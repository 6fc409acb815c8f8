//! Cycle-level model of a small processor's memory-management unit.
//!
//! This crate implements the unit that routes every CPU memory access to one
//! of three destinations under a fixed one-cycle latency:
//! 1. **Core:** Address decode, store-data packing, load-result unpacking and
//!    the pipeline register that delays the response by one cycle.
//! 2. **SoC:** Reference collaborators behind the ports: a 4 KiB instruction
//!    store, a main-memory bank and a 256-byte I/O block with devices.
//! 3. **Simulation:** Program loading, JSON request traces, configuration and
//!    statistics collection.
//!
//! # Memory map
//!
//! | Range                       | Destination        |
//! |-----------------------------|--------------------|
//! | `0x0000_0000..0x0000_1000`  | instruction store  |
//! | `0x1000_0000..0x8000_0000`  | main memory        |
//! | `0x8000_0000..0x8000_0100`  | I/O port block     |
//! | anything else               | unknown            |

/// Common types and constants (memory map, byte enables, errors).
pub mod common;
/// Simulator configuration (defaults, validation, JSON structures).
pub mod config;
/// Memory unit core (decoder, packer, unpacker, pipeline register, orchestration).
pub mod core;
/// Program loading, traces and the simulator driver.
pub mod sim;
/// Collaborators behind the ports (instruction store, main memory, I/O block).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The memory-management unit.
pub use crate::core::Mmu;
/// Simulator driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Collaborators behind the ports; construct with `System::new`.
pub use crate::soc::System;
