//! Memory-management unit core.
//!
//! This module contains the data path of the unit and the orchestrator that
//! wires it to the ports each cycle.

/// Pipeline register and the signals crossing the unit's boundaries.
pub mod pipeline;

/// Combinational units (decoder, packer, unpacker).
pub mod units;

/// Per-cycle orchestration.
pub mod mmu;

pub use self::mmu::Mmu;
