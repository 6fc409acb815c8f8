//! Scratch register file.
//!
//! General-purpose 32-bit registers that retain whatever is stored to them,
//! lane by lane. Programs use them as I/O-side mailboxes; tests use them to
//! observe sub-word stores through the I/O port.

use crate::common::constants::WORD_BYTES;
use crate::common::data::ByteEnable;
use crate::soc::devices::IoDevice;

/// Scratch device structure.
#[derive(Debug, Clone)]
pub struct Scratch {
    offset: u32,
    regs: Vec<u32>,
}

impl Scratch {
    /// Creates `words` zeroed registers at `offset`.
    pub fn new(offset: u32, words: u32) -> Self {
        Self {
            offset,
            regs: vec![0; words as usize],
        }
    }

    /// Returns the register at index `index`.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.regs.get(index).copied()
    }
}

impl IoDevice for Scratch {
    fn name(&self) -> &'static str {
        "scratch"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.offset, self.regs.len() as u32 * WORD_BYTES)
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        self.get((offset / WORD_BYTES) as usize).unwrap_or(0)
    }

    fn write_u32(&mut self, offset: u32, val: u32, lanes: ByteEnable) {
        if let Some(reg) = self.regs.get_mut((offset / WORD_BYTES) as usize) {
            *reg = lanes.merge(*reg, val);
        }
    }
}
