//! Error types for the memory-management unit and its harness.
//!
//! The data path itself never fails at run time: contract violations produce
//! an unspecified load value instead of an error. The types here report:
//! 1. **Access errors:** Masks the packer and unpacker cannot interpret.
//! 2. **Configuration errors:** Rejected JSON configuration values.
//! 3. **Load errors:** Unreadable or oversized program images.
//! 4. **Simulation errors:** The union of the above for the harness and CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A data-path access whose byte-enable mask is outside the seven legal patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The mask value (low four bits) has no defined lane placement.
    #[error("illegal byte-enable mask {0:04b}")]
    IllegalByteEnable(u8),
}

/// Invalid configuration values detected by [`crate::config::Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Main-memory backing size is not a power of two.
    #[error("memory.ram_size {0:#x} is not a power of two")]
    RamSizeNotPowerOfTwo(usize),

    /// Main-memory backing size exceeds the decoded window.
    #[error("memory.ram_size {size:#x} exceeds the {max:#x}-byte window")]
    RamSizeTooLarge {
        /// Requested size in bytes.
        size: usize,
        /// Window size in bytes.
        max: usize,
    },

    /// A device window extends past the 256-byte I/O block.
    #[error("io device '{name}' at {offset:#x} (+{size:#x}) leaves the I/O block")]
    IoWindowOutOfRange {
        /// Device name.
        name: &'static str,
        /// Offset inside the block.
        offset: u32,
        /// Window size in bytes.
        size: u32,
    },

    /// A device offset is not word aligned.
    #[error("io device '{name}' offset {offset:#x} is not word aligned")]
    IoMisaligned {
        /// Device name.
        name: &'static str,
        /// Offending offset.
        offset: u32,
    },

    /// Two device windows overlap.
    #[error("io devices '{first}' and '{second}' overlap")]
    IoOverlap {
        /// Device with the lower offset.
        first: &'static str,
        /// Device with the higher offset.
        second: &'static str,
    },
}

/// Failure to load a program image into the instruction store or main memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A flat image larger than the instruction store.
    #[error("image is {len} bytes, instruction store holds {max}")]
    TooLarge {
        /// Image length in bytes.
        len: usize,
        /// Capacity in bytes.
        max: usize,
    },

    /// A flat image whose length is not a whole number of words.
    #[error("image length {0} is not a multiple of 4")]
    Unaligned(usize),

    /// The ELF container could not be parsed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// A loadable segment lies outside both the instruction store and main memory.
    #[error("segment at {addr:#010x} (+{len:#x}) is outside the instruction store and main memory")]
    SegmentOutOfRange {
        /// Segment start address.
        addr: u64,
        /// Segment length in bytes.
        len: usize,
    },
}

/// Top-level error for building and driving a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Program image rejected.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration or trace JSON could not be parsed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a configuration or trace file failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
