//! Collaborators of the memory unit.
//!
//! This module organizes the components behind the unit's three ports: the
//! instruction store, the main-memory bank and the I/O port block with its
//! devices, plus the builder that assembles them from configuration.

/// System builder for assembling the collaborators.
pub mod builder;

/// Devices attached to the I/O block.
pub mod devices;

/// I/O port block and device routing.
pub mod io;

/// Main-memory bank and its backing buffer.
pub mod memory;

/// Instruction store.
pub mod rom;

/// Port trait definitions.
pub mod traits;

pub use builder::System;
pub use io::IoBlock;
pub use memory::MainMemory;
pub use rom::InstructionRom;
pub use traits::{InstructionPort, IoPort, MemoryPort};
