//! Program image loading.
//!
//! This module turns files on disk into a [`ProgramImage`]. It performs:
//! 1. **Flat images:** Raw little-endian words placed at the start of the
//!    instruction store.
//! 2. **ELF images:** 32-bit ELF files whose loadable segments are placed in
//!    the instruction store or main memory according to their addresses.
//! 3. **Validation:** Rejects images that do not fit the memory map.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Endianness, Object, ObjectSegment};
use tracing::info;

use crate::common::constants::{RAM_BASE, RAM_END, ROM_SIZE, WORD_BYTES};
use crate::common::error::LoadError;

/// ELF magic number.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Contents to place in the instruction store and main memory before reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramImage {
    /// Instruction-store bytes starting at offset 0; a whole number of words.
    pub rom: Vec<u8>,
    /// Main-memory segments as `(window offset, bytes)`.
    pub ram: Vec<(u32, Vec<u8>)>,
    /// Address of the first instruction.
    pub entry: u32,
}

impl ProgramImage {
    /// Wraps a flat instruction-store image.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the image exceeds 4 KiB and
    /// [`LoadError::Unaligned`] if its length is not a multiple of 4.
    pub fn flat(bytes: Vec<u8>) -> Result<Self, LoadError> {
        if bytes.len() > ROM_SIZE as usize {
            return Err(LoadError::TooLarge {
                len: bytes.len(),
                max: ROM_SIZE as usize,
            });
        }
        if bytes.len() % WORD_BYTES as usize != 0 {
            return Err(LoadError::Unaligned(bytes.len()));
        }
        Ok(Self {
            rom: bytes,
            ram: Vec::new(),
            entry: 0,
        })
    }

    /// Builds an image from the loadable segments of a 32-bit ELF file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Elf`] for a malformed file and
    /// [`LoadError::SegmentOutOfRange`] for a segment outside the instruction
    /// store and main memory.
    pub fn from_elf(data: &[u8]) -> Result<Self, LoadError> {
        let elf = ElfFile32::<Endianness>::parse(data)?;
        let mut image = Self {
            entry: elf.entry() as u32,
            ..Self::default()
        };

        for segment in elf.segments() {
            let bytes = segment.data()?;
            if bytes.is_empty() {
                continue;
            }
            let addr = segment.address();
            let end = addr + bytes.len() as u64;
            if end <= u64::from(ROM_SIZE) {
                let start = addr as usize;
                let padded = end.next_multiple_of(u64::from(WORD_BYTES)) as usize;
                if image.rom.len() < padded {
                    image.rom.resize(padded, 0);
                }
                image.rom[start..start + bytes.len()].copy_from_slice(bytes);
            } else if addr >= u64::from(RAM_BASE) && end <= u64::from(RAM_END) {
                image.ram.push(((addr as u32) - RAM_BASE, bytes.to_vec()));
            } else {
                return Err(LoadError::SegmentOutOfRange {
                    addr,
                    len: bytes.len(),
                });
            }
        }
        Ok(image)
    }

    /// Returns the number of bytes placed in main memory.
    pub fn ram_bytes(&self) -> usize {
        self.ram.iter().map(|(_, bytes)| bytes.len()).sum()
    }
}

/// Reads a file from disk, reporting the path on failure.
fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a flat instruction-store image.
///
/// # Errors
///
/// See [`ProgramImage::flat`]; also [`LoadError::Io`] if the file cannot be read.
pub fn load_rom_image(path: impl AsRef<Path>) -> Result<ProgramImage, LoadError> {
    let path = path.as_ref();
    let image = ProgramImage::flat(read_file(path)?)?;
    info!("loaded {} ({} bytes, flat)", path.display(), image.rom.len());
    Ok(image)
}

/// Loads an ELF or flat image, detected by the ELF magic number.
///
/// # Errors
///
/// See [`ProgramImage::from_elf`] and [`ProgramImage::flat`].
pub fn load_image(path: impl AsRef<Path>) -> Result<ProgramImage, LoadError> {
    let path = path.as_ref();
    let data = read_file(path)?;
    if !data.starts_with(ELF_MAGIC) {
        let image = ProgramImage::flat(data)?;
        info!("loaded {} ({} bytes, flat)", path.display(), image.rom.len());
        return Ok(image);
    }
    let image = ProgramImage::from_elf(&data)?;
    info!(
        "loaded {} (elf, entry {:#010x}, rom {} bytes, ram {} bytes)",
        path.display(),
        image.entry,
        image.rom.len(),
        image.ram_bytes()
    );
    Ok(image)
}
