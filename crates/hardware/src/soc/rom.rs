//! Instruction store.
//!
//! 4 KiB of little-endian words behind the instruction port. The data side of
//! the memory unit never reads or writes it.

use tracing::info;

use crate::common::constants::{ROM_SIZE, ROM_WORDS, WORD_BYTES};
use crate::common::error::LoadError;
use crate::soc::traits::InstructionPort;

/// Word-addressed read-only store.
#[derive(Clone, Debug)]
pub struct InstructionRom {
    words: Vec<u32>,
    read_data: u32,
}

impl InstructionRom {
    /// Creates a store filled with zeros.
    pub fn new() -> Self {
        Self {
            words: vec![0; ROM_WORDS],
            read_data: 0,
        }
    }

    /// Creates a store from a flat little-endian image, zero-filling the rest.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the image exceeds 4 KiB and
    /// [`LoadError::Unaligned`] if its length is not a multiple of 4.
    pub fn from_image(image: &[u8]) -> Result<Self, LoadError> {
        let mut rom = Self::new();
        rom.load(0, image)?;
        Ok(rom)
    }

    /// Writes `image` at byte `offset`. Used by the loader only.
    ///
    /// # Errors
    ///
    /// See [`InstructionRom::from_image`].
    pub fn load(&mut self, offset: u32, image: &[u8]) -> Result<(), LoadError> {
        let start = offset as usize;
        if start + image.len() > ROM_SIZE as usize {
            return Err(LoadError::TooLarge {
                len: start + image.len(),
                max: ROM_SIZE as usize,
            });
        }
        if image.len() % WORD_BYTES as usize != 0 || start % WORD_BYTES as usize != 0 {
            return Err(LoadError::Unaligned(image.len()));
        }
        let first = start / WORD_BYTES as usize;
        for (slot, chunk) in self.words[first..].iter_mut().zip(image.chunks_exact(4)) {
            *slot = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        info!(offset, bytes = image.len(), "instruction store loaded");
        Ok(())
    }

    /// Returns the word at byte `offset`, aligned down and wrapped to 4 KiB.
    pub fn word(&self, offset: u32) -> u32 {
        self.words[((offset % ROM_SIZE) / WORD_BYTES) as usize]
    }
}

impl Default for InstructionRom {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionPort for InstructionRom {
    fn clock(&mut self, offset: u32) {
        self.read_data = self.word(offset);
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }
}
