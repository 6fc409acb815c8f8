//! Main-memory bank.
//!
//! This module implements the bank behind the main-memory port. It provides:
//! 1. **Buffer:** Backing storage (`DramBuffer`) for the bank contents.
//! 2. **Bank:** The synchronous port: read-before-write, per-lane writes.
//!
//! The bank decodes only as many offset bits as its backing size needs, so
//! offsets beyond the backing size alias lower ones.

/// Backing byte buffer (`mmap` or heap).
pub mod buffer;

use std::io;

use tracing::trace;

use self::buffer::DramBuffer;
use crate::common::constants::{LANES, WORD_BYTES};
use crate::core::pipeline::signals::MemorySignals;
use crate::soc::traits::MemoryPort;

/// Byte-addressable bank with four byte lanes per word.
#[derive(Debug)]
pub struct MainMemory {
    buffer: DramBuffer,
    /// `size - 1`; the backing size is a power of two.
    offset_mask: u32,
    read_data: u32,
}

impl MainMemory {
    /// Creates a zeroed bank. `size` is rounded up to a power of two of at
    /// least one word.
    ///
    /// # Errors
    ///
    /// Returns the host error if the backing buffer cannot be allocated.
    pub fn new(size: usize) -> io::Result<Self> {
        let size = size.next_power_of_two().max(WORD_BYTES as usize);
        let buffer = DramBuffer::new(size)?;
        Ok(Self {
            buffer,
            offset_mask: (size - 1) as u32,
            read_data: 0,
        })
    }

    /// Maps a window offset onto the byte index of its word in the buffer.
    const fn word_index(&self, offset: u32) -> usize {
        (offset & self.offset_mask & !(WORD_BYTES - 1)) as usize
    }
}

impl MemoryPort for MainMemory {
    fn clock(&mut self, signals: &MemorySignals) {
        let index = self.word_index(signals.offset);
        let old = self.buffer.read_u32(index);
        self.read_data = old;

        if !signals.write_enable {
            return;
        }
        let bytes = signals.write_data.to_le_bytes();
        let word = &mut self.buffer.as_mut_slice()[index..index + LANES];
        for (lane, (slot, byte)) in word.iter_mut().zip(bytes).enumerate() {
            if signals.lane_enabled(lane) {
                *slot = byte;
            }
        }
        trace!(
            offset = format_args!("{:#x}", signals.offset),
            lanes = %signals.write_lanes,
            old = format_args!("{old:#010x}"),
            new = format_args!("{:#010x}", self.buffer.read_u32(index)),
            "ram write"
        );
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }

    fn peek(&self, offset: u32) -> u32 {
        self.buffer.read_u32(self.word_index(offset))
    }

    fn size(&self) -> usize {
        self.buffer.len()
    }

    fn load(&mut self, offset: u32, data: &[u8]) {
        let bytes = self.buffer.as_mut_slice();
        for (i, &byte) in data.iter().enumerate() {
            let index = (offset.wrapping_add(i as u32) & self.offset_mask) as usize;
            bytes[index] = byte;
        }
    }
}
