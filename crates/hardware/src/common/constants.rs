//! Memory map and architectural constants.
//!
//! The address windows are fixed by the hardware and are not configurable.
//! Only the backing size of the main-memory bank is a configuration choice
//! (see [`crate::config::MemoryConfig`]).

/// First address of the instruction-store window.
pub const ROM_BASE: u32 = 0x0000_0000;

/// Size of the instruction store in bytes (4 KiB).
pub const ROM_SIZE: u32 = 0x0000_1000;

/// Number of 32-bit words held by the instruction store.
pub const ROM_WORDS: usize = (ROM_SIZE / WORD_BYTES) as usize;

/// First address of the main-memory window.
pub const RAM_BASE: u32 = 0x1000_0000;

/// First address past the main-memory window.
pub const RAM_END: u32 = 0x8000_0000;

/// Size of the main-memory window in bytes.
pub const RAM_WINDOW_SIZE: u32 = RAM_END - RAM_BASE;

/// First address of the I/O port block.
pub const IO_BASE: u32 = 0x8000_0000;

/// Size of the I/O port block in bytes.
pub const IO_SIZE: u32 = 0x100;

/// `addi x0, x0, 0`: the instruction result forced while the pipeline is
/// still in reset.
pub const NOP: u32 = 0x0000_0013;

/// Bytes per word.
pub const WORD_BYTES: u32 = 4;

/// Byte lanes per word.
pub const LANES: usize = 4;
