//! Request, response and port signals of the memory unit.
//!
//! This module defines the values that cross the unit's boundaries each cycle:
//! 1. **Requests:** One data access presented by the CPU per cycle.
//! 2. **Responses:** The result of the request issued one cycle earlier.
//! 3. **Port Signals:** What the unit drives onto the main-memory and I/O ports.

use crate::common::data::{ByteEnable, Destination, LoadValue};

/// Address driven while no data access is wanted; decodes to `Unknown`.
pub const IDLE_ADDRESS: u32 = 0xFFFF_FFFF;

/// One data access presented to the memory unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// Byte address.
    pub address: u32,
    /// Store value; only the low bytes covered by `mask` are used.
    pub write_data: u32,
    /// Byte-enable mask.
    pub mask: ByteEnable,
    /// Store when set, load otherwise.
    pub write_enable: bool,
    /// Sign-extend sub-word loads.
    pub signed: bool,
}

impl Request {
    /// Creates a load request.
    pub const fn read(address: u32, mask: ByteEnable, signed: bool) -> Self {
        Self {
            address,
            write_data: 0,
            mask,
            write_enable: false,
            signed,
        }
    }

    /// Creates a store request.
    pub const fn write(address: u32, value: u32, mask: ByteEnable) -> Self {
        Self {
            address,
            write_data: value,
            mask,
            write_enable: true,
            signed: false,
        }
    }

    /// Creates a request that addresses nothing.
    pub const fn idle() -> Self {
        Self::read(IDLE_ADDRESS, ByteEnable::WORD, false)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::idle()
    }
}

/// Result of the request issued one cycle earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Response {
    /// Destination latched for that request, or `None` right after reset.
    pub destination: Option<Destination>,
    /// Unpacked load data.
    pub data: LoadValue,
}

/// Signals driven onto the main-memory port for one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MemorySignals {
    /// Byte offset relative to the start of the window.
    pub offset: u32,
    /// Per-lane write enables; all clear unless this is a store.
    pub write_lanes: ByteEnable,
    /// Packed write data.
    pub write_data: u32,
    /// Port write enable.
    pub write_enable: bool,
}

impl MemorySignals {
    /// Returns whether lane `lane` will be written at this edge.
    pub const fn lane_enabled(&self, lane: usize) -> bool {
        self.write_enable && self.write_lanes.lane(lane)
    }
}

/// Signals driven onto the I/O port for one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct IoSignals {
    /// Byte offset inside the block.
    pub offset: u8,
    /// Port enable; asserted on every I/O access, reads included.
    pub enable: bool,
    /// Port write enable.
    pub write_enable: bool,
    /// Per-lane write enables.
    pub write_lanes: ByteEnable,
    /// Packed write data.
    pub write_data: u32,
}

impl IoSignals {
    /// Returns whether a device write happens at this edge.
    pub const fn write_strobe(&self) -> bool {
        self.enable && self.write_enable
    }
}

/// Everything the unit drives at one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PortSignals {
    /// Word offset presented to the instruction port.
    pub fetch_offset: u32,
    /// Main-memory port signals.
    pub memory: MemorySignals,
    /// I/O port signals.
    pub io: IoSignals,
}
