//! Access descriptors shared by the decoder, the data path and the ports.
//!
//! This module defines:
//! 1. **Byte enables:** The 4-bit lane mask carried by every data access and
//!    its classification into the seven legal lane patterns.
//! 2. **Destinations:** The tagged result of address decode.
//! 3. **Load values:** Response payloads that keep "unspecified" explicit
//!    instead of folding it into a zero.

use std::fmt;

use serde::Deserialize;

use crate::common::constants::LANES;

/// Width of a data access, used to derive a byte-enable mask from an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessWidth {
    /// Single byte.
    Byte,
    /// Two bytes.
    Half,
    /// Four bytes.
    Word,
}

/// Classification of a legal byte-enable mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanePattern {
    /// `1111`: all four lanes.
    Word,
    /// `1100` (`upper`) or `0011`.
    Half {
        /// Whether the upper half-word is selected.
        upper: bool,
    },
    /// One of `0001`, `0010`, `0100`, `1000`.
    Byte {
        /// Selected lane, 0 through 3.
        lane: u8,
    },
}

impl LanePattern {
    /// Bit position of the lowest selected lane.
    pub const fn shift(self) -> u32 {
        match self {
            Self::Word => 0,
            Self::Half { upper } => {
                if upper {
                    16
                } else {
                    0
                }
            }
            Self::Byte { lane } => 8 * lane as u32,
        }
    }

    /// Mask covering the width of the field, before shifting.
    pub const fn field_mask(self) -> u32 {
        match self {
            Self::Word => u32::MAX,
            Self::Half { .. } => 0xFFFF,
            Self::Byte { .. } => 0xFF,
        }
    }

    /// Width of the field in bits.
    pub const fn width_bits(self) -> u32 {
        match self {
            Self::Word => 32,
            Self::Half { .. } => 16,
            Self::Byte { .. } => 8,
        }
    }
}

/// Per-lane byte-enable mask of a 32-bit access.
///
/// Bit `i` selects byte lane `i` (bits `8i..8i+8` of the word). Only the low
/// four bits are kept. Any 4-bit value can be represented, because the
/// hardware accepts any value on the wire; [`ByteEnable::pattern`] tells legal
/// and illegal masks apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "u8")]
pub struct ByteEnable(u8);

impl ByteEnable {
    /// No lanes.
    pub const NONE: Self = Self(0b0000);
    /// Full word.
    pub const WORD: Self = Self(0b1111);
    /// Upper half-word (lanes 2 and 3).
    pub const HALF_UPPER: Self = Self(0b1100);
    /// Lower half-word (lanes 0 and 1).
    pub const HALF_LOWER: Self = Self(0b0011);
    /// Lane 0.
    pub const BYTE0: Self = Self(0b0001);
    /// Lane 1.
    pub const BYTE1: Self = Self(0b0010);
    /// Lane 2.
    pub const BYTE2: Self = Self(0b0100);
    /// Lane 3.
    pub const BYTE3: Self = Self(0b1000);

    /// The seven masks inside the access contract.
    pub const LEGAL: [Self; 7] = [
        Self::WORD,
        Self::HALF_UPPER,
        Self::HALF_LOWER,
        Self::BYTE0,
        Self::BYTE1,
        Self::BYTE2,
        Self::BYTE3,
    ];

    /// Creates a mask from the low four bits of `bits`.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0xF)
    }

    /// Returns the raw 4-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns whether lane `lane` is enabled.
    pub const fn lane(self, lane: usize) -> bool {
        lane < LANES && (self.0 >> lane) & 1 != 0
    }

    /// Classifies the mask, or returns `None` for a mask outside the contract.
    pub const fn pattern(self) -> Option<LanePattern> {
        match self.0 {
            0b1111 => Some(LanePattern::Word),
            0b1100 => Some(LanePattern::Half { upper: true }),
            0b0011 => Some(LanePattern::Half { upper: false }),
            0b0001 => Some(LanePattern::Byte { lane: 0 }),
            0b0010 => Some(LanePattern::Byte { lane: 1 }),
            0b0100 => Some(LanePattern::Byte { lane: 2 }),
            0b1000 => Some(LanePattern::Byte { lane: 3 }),
            _ => None,
        }
    }

    /// Returns whether the mask is one of the seven legal patterns.
    pub const fn is_legal(self) -> bool {
        self.pattern().is_some()
    }

    /// Expands the mask to a 32-bit bit mask (`0xFF` per enabled lane).
    pub const fn bit_mask(self) -> u32 {
        let mut mask = 0;
        let mut lane = 0;
        while lane < LANES {
            if self.lane(lane) {
                mask |= 0xFF << (8 * lane);
            }
            lane += 1;
        }
        mask
    }

    /// Replaces the enabled lanes of `old` with the same lanes of `new`.
    pub const fn merge(self, old: u32, new: u32) -> u32 {
        let mask = self.bit_mask();
        (old & !mask) | (new & mask)
    }

    /// Derives the mask a load/store unit would present for an access of
    /// `width` at `address`.
    ///
    /// Half-word accesses select the half containing `address`; the low
    /// address bit is ignored, as the core never checks alignment.
    pub const fn for_access(address: u32, width: AccessWidth) -> Self {
        match width {
            AccessWidth::Byte => Self(1 << (address & 3)),
            AccessWidth::Half => {
                if address & 2 != 0 {
                    Self::HALF_UPPER
                } else {
                    Self::HALF_LOWER
                }
            }
            AccessWidth::Word => Self::WORD,
        }
    }
}

impl From<u8> for ByteEnable {
    fn from(bits: u8) -> Self {
        Self::new(bits)
    }
}

impl fmt::Debug for ByteEnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteEnable({:04b})", self.0)
    }
}

impl fmt::Display for ByteEnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

/// Target selected by address decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Read-only instruction store, `[0, 0x1000)`.
    InstructionStore,
    /// Main memory bank, `[0x1000_0000, 0x8000_0000)`.
    MainMemory,
    /// Memory-mapped I/O port block, `[0x8000_0000, 0x8000_0100)`.
    IoPort,
    /// Outside every window. Reachable, and its result is unspecified.
    Unknown,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InstructionStore => "rom",
            Self::MainMemory => "ram",
            Self::IoPort => "io",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Type of memory access operation, used for statistics and trace output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch through the instruction port.
    Fetch,
    /// Data read.
    Read,
    /// Data write.
    Write,
}

/// Data returned for a request one cycle after it was issued.
///
/// `Unspecified` is returned wherever the hardware gives no guarantee: right
/// after reset, for `Unknown` and instruction-store data reads, and for masks
/// outside the seven legal patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LoadValue {
    /// A value the access contract guarantees.
    Defined(u32),
    /// No guarantee; the caller broke the contract or nothing was addressed.
    #[default]
    Unspecified,
}

impl LoadValue {
    /// Returns the value if it is defined.
    pub const fn value(self) -> Option<u32> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Unspecified => None,
        }
    }

    /// Returns whether the value is defined.
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl fmt::Display for LoadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:#010x}"),
            Self::Unspecified => f.write_str("xxxxxxxxxx"),
        }
    }
}
