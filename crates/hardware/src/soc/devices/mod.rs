//! Devices attached to the I/O port block.
//!
//! This module defines the `IoDevice` trait and the devices the block ships
//! with: a transmit-only serial port, a system controller used to end a run,
//! and a small scratch register file.

/// Scratch register file.
pub mod scratch;

/// System controller (exit requests).
pub mod syscon;

/// Transmit-only serial port.
pub mod uart;

pub use scratch::Scratch;
pub use syscon::SysCon;
pub use uart::Uart;

use crate::common::data::ByteEnable;

/// Trait for devices mapped into the 256-byte I/O block.
///
/// Offsets passed to a device are relative to its own window and word
/// aligned. Writes carry the lane mask of the store so devices can honor
/// sub-word accesses.
pub trait IoDevice: Send {
    /// Returns a short name for this device (e.g., `"uart"`).
    fn name(&self) -> &'static str;

    /// Returns `(offset, size)` of this device's window inside the block.
    fn address_range(&self) -> (u32, u32);

    /// Reads the word at the given device-relative offset.
    fn read_u32(&mut self, offset: u32) -> u32;

    /// Writes the enabled lanes of `val` at the given device-relative offset.
    fn write_u32(&mut self, offset: u32, val: u32, lanes: ByteEnable);

    /// Advances device state by one cycle.
    fn tick(&mut self) {}

    /// Pushes any buffered output to the host.
    fn flush(&mut self) {}
}
