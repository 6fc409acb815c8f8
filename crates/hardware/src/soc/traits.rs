//! Port interfaces between the memory unit and its collaborators.
//!
//! This module defines the three ports the unit drives every cycle. It provides:
//! 1. **Instruction port:** Word reads from the read-only instruction store.
//! 2. **Memory port:** Masked word reads and writes to the main-memory bank.
//! 3. **I/O port:** Masked word reads and writes to the I/O block, with an enable.
//!
//! Every port is synchronous: `clock` samples the signals at a rising edge and
//! `read_data` returns what was latched at that edge, one cycle after the
//! request. All implementors must be `Send` so a system can move between threads.

use crate::core::pipeline::signals::{IoSignals, MemorySignals};

/// Read-only instruction store.
pub trait InstructionPort: Send {
    /// Samples the word offset at a clock edge.
    fn clock(&mut self, offset: u32);

    /// Returns the word latched at the last edge.
    fn read_data(&self) -> u32;
}

/// Main-memory bank.
pub trait MemoryPort: Send {
    /// Samples the port signals at a clock edge.
    ///
    /// The word at the addressed offset is latched before any enabled lanes
    /// are written, and the mask never affects what is read.
    fn clock(&mut self, signals: &MemorySignals);

    /// Returns the word latched at the last edge.
    fn read_data(&self) -> u32;

    /// Reads the word at `offset` without clocking the port.
    fn peek(&self, offset: u32) -> u32;

    /// Backing size in bytes.
    fn size(&self) -> usize;

    /// Copies `data` into the bank at `offset` without clocking the port.
    fn load(&mut self, offset: u32, data: &[u8]);
}

/// Memory-mapped I/O port block.
pub trait IoPort: Send {
    /// Samples the port signals at a clock edge.
    fn clock(&mut self, signals: &IoSignals);

    /// Returns the word latched at the last edge.
    fn read_data(&self) -> u32;

    /// Returns the port enable registered at the last edge.
    fn enabled(&self) -> bool;

    /// Returns whether a device write happened at the last edge.
    fn write_strobe(&self) -> bool;

    /// Advances device state by one cycle.
    fn tick(&mut self) {}

    /// Pushes any buffered device output to the host.
    fn flush(&mut self) {}
}
