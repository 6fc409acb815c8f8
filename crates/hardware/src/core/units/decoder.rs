//! Address decoder.
//!
//! Maps a 32-bit address onto one of the fixed windows and computes the
//! offset relative to the start of that window. The decoder is pure; the
//! orchestration in [`crate::core::mmu`] acts on its result.

use crate::common::constants::{IO_BASE, IO_SIZE, RAM_BASE, RAM_END, ROM_SIZE};
use crate::common::data::Destination;

/// Result of decoding one address.
///
/// Each variant carries the offset that is meaningful for its destination;
/// `Unknown` has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoded {
    /// Instruction store; offset equals the address.
    InstructionStore {
        /// Byte offset in `[0, 0x1000)`.
        offset: u32,
    },
    /// Main memory; offset is relative to `0x1000_0000`.
    MainMemory {
        /// Byte offset in `[0, 0x7000_0000)`.
        offset: u32,
    },
    /// I/O port block; offset is the low eight bits.
    IoPort {
        /// Byte offset in `[0, 0x100)`.
        offset: u8,
    },
    /// No window matched.
    Unknown,
}

impl Decoded {
    /// Returns the destination tag without its offset.
    pub const fn destination(self) -> Destination {
        match self {
            Self::InstructionStore { .. } => Destination::InstructionStore,
            Self::MainMemory { .. } => Destination::MainMemory,
            Self::IoPort { .. } => Destination::IoPort,
            Self::Unknown => Destination::Unknown,
        }
    }

    /// Returns the window-relative offset, or `None` for `Unknown`.
    pub const fn offset(self) -> Option<u32> {
        match self {
            Self::InstructionStore { offset } | Self::MainMemory { offset } => Some(offset),
            Self::IoPort { offset } => Some(offset as u32),
            Self::Unknown => None,
        }
    }
}

/// Combinational address decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressDecoder;

impl AddressDecoder {
    /// Decodes `address` into its destination and relative offset.
    ///
    /// Never fails: addresses outside every window decode to
    /// [`Decoded::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mmu_core::core::units::decoder::{AddressDecoder, Decoded};
    ///
    /// assert_eq!(
    ///     AddressDecoder::decode(0x1000_0010),
    ///     Decoded::MainMemory { offset: 0x10 }
    /// );
    /// assert_eq!(AddressDecoder::decode(0x8000_0100), Decoded::Unknown);
    /// ```
    pub const fn decode(address: u32) -> Decoded {
        if address < ROM_SIZE {
            Decoded::InstructionStore { offset: address }
        } else if address >= RAM_BASE && address < RAM_END {
            Decoded::MainMemory {
                offset: address - RAM_BASE,
            }
        } else if address >= IO_BASE && address - IO_BASE < IO_SIZE {
            Decoded::IoPort {
                offset: (address - IO_BASE) as u8,
            }
        } else {
            Decoded::Unknown
        }
    }
}
