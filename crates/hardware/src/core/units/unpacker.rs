//! Load result unpacker.
//!
//! Extracts the lanes selected by a latched byte-enable mask from the raw word
//! returned by a port and sign- or zero-extends them to 32 bits.

use crate::common::data::{ByteEnable, LanePattern};
use crate::common::error::AccessError;

/// Combinational load-result unpacker.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadResultUnpacker;

impl LoadResultUnpacker {
    /// Extracts and extends the field of `raw` selected by `mask`.
    ///
    /// `signed` selects sign extension from the top bit of the field; it has
    /// no effect on a full-word access.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IllegalByteEnable`] if `mask` is not one of the
    /// seven legal patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmu_core::common::ByteEnable;
    /// use mmu_core::core::units::unpacker::LoadResultUnpacker;
    ///
    /// let raw = 0x80FF_0000;
    /// assert_eq!(LoadResultUnpacker::unpack(raw, ByteEnable::BYTE3, true), Ok(0xFFFF_FF80));
    /// assert_eq!(LoadResultUnpacker::unpack(raw, ByteEnable::BYTE3, false), Ok(0x0000_0080));
    /// ```
    pub const fn unpack(raw: u32, mask: ByteEnable, signed: bool) -> Result<u32, AccessError> {
        let Some(pattern) = mask.pattern() else {
            return Err(AccessError::IllegalByteEnable(mask.bits()));
        };
        let field = raw >> pattern.shift();
        let value = match (pattern, signed) {
            (LanePattern::Word, _) => raw,
            (LanePattern::Half { .. }, true) => (field as u16 as i16) as i32 as u32,
            (LanePattern::Half { .. }, false) => field as u16 as u32,
            (LanePattern::Byte { .. }, true) => (field as u8 as i8) as i32 as u32,
            (LanePattern::Byte { .. }, false) => field as u8 as u32,
        };
        Ok(value)
    }
}
