//! Store data packer.
//!
//! Places the low bytes of a store value onto the byte lanes selected by the
//! byte-enable mask. Lanes outside the mask are driven to zero; the memory
//! bank ignores them because their enables are not asserted.

use crate::common::data::ByteEnable;
use crate::common::error::AccessError;

/// Combinational store-data packer.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreDataPacker;

impl StoreDataPacker {
    /// Packs `value` onto the lanes selected by `mask`.
    ///
    /// | mask   | result                         |
    /// |--------|--------------------------------|
    /// | `1111` | `value`                        |
    /// | `1100` | `value[15:0]` in bits `[31:16]` |
    /// | `0011` | `value[15:0]` in bits `[15:0]`  |
    /// | `1<<i` | `value[7:0]` in lane `i`       |
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IllegalByteEnable`] for any other mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use mmu_core::common::ByteEnable;
    /// use mmu_core::core::units::packer::StoreDataPacker;
    ///
    /// let packed = StoreDataPacker::pack(0x1234_56AB, ByteEnable::BYTE2).unwrap();
    /// assert_eq!(packed, 0x00AB_0000);
    /// ```
    pub const fn pack(value: u32, mask: ByteEnable) -> Result<u32, AccessError> {
        match mask.pattern() {
            Some(pattern) => Ok((value & pattern.field_mask()) << pattern.shift()),
            None => Err(AccessError::IllegalByteEnable(mask.bits())),
        }
    }
}
