//! Configuration system for the memory-unit simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulated system. It provides:
//! 1. **Defaults:** Baseline values for the main-memory backing and the I/O block layout.
//! 2. **Structures:** Hierarchical config for general, memory and I/O settings.
//! 3. **Validation:** Checks that reject layouts the hardware cannot decode.
//!
//! Configuration is supplied as JSON, or use `Config::default()` for the CLI.
//! The address windows themselves are fixed (see [`crate::common::constants`]).

use serde::Deserialize;

use crate::common::constants::{IO_SIZE, RAM_WINDOW_SIZE, WORD_BYTES};
use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Backing size of the main-memory bank (16 MiB).
    ///
    /// Offsets beyond this size wrap, as the upper offset lines are not
    /// connected to the bank.
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Offset of the UART inside the I/O block.
    pub const UART_OFFSET: u32 = 0x00;

    /// Offset of the system controller inside the I/O block.
    pub const SYSCON_OFFSET: u32 = 0x10;

    /// Offset of the scratch register file inside the I/O block.
    pub const SCRATCH_OFFSET: u32 = 0x80;

    /// Number of 32-bit scratch registers.
    pub const SCRATCH_WORDS: u32 = 32;
}

/// Size in bytes of the UART register window (transmit + status).
pub const UART_WINDOW: u32 = 8;

/// Size in bytes of the system controller window.
pub const SYSCON_WINDOW: u32 = 4;

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use mmu_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_accesses);
/// assert_eq!(config.memory.ram_size, 16 * 1024 * 1024);
/// ```
///
/// Deserializing a partial document; missing fields take their defaults:
///
/// ```
/// use mmu_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_accesses": true, "max_cycles": 1000 },
///     "memory": { "ram_size": 65536 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_accesses);
/// assert_eq!(config.general.max_cycles, Some(1000));
/// assert_eq!(config.memory.ram_size, 65536);
/// assert_eq!(config.io.scratch_offset, 0x80);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Main-memory bank configuration.
    pub memory: MemoryConfig,
    /// I/O port block layout.
    pub io: IoConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is malformed and
    /// [`SimError::Config`] if a value is rejected by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes hardware that can be built.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.memory.validate()?;
        self.io.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Report every completed access on stdout in addition to `trace!` events.
    pub trace_accesses: bool,

    /// Stop a trace run after this many cycles.
    pub max_cycles: Option<u64>,
}

/// Main-memory bank configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Backing size in bytes; must be a power of two no larger than the window.
    pub ram_size: usize,
}

impl MemoryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.ram_size.is_power_of_two() {
            return Err(ConfigError::RamSizeNotPowerOfTwo(self.ram_size));
        }
        let max = RAM_WINDOW_SIZE as usize;
        if self.ram_size > max {
            return Err(ConfigError::RamSizeTooLarge {
                size: self.ram_size,
                max,
            });
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Layout of the devices inside the 256-byte I/O block.
///
/// Offsets are relative to the start of the block.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// UART register window offset.
    pub uart_offset: u32,

    /// System controller offset.
    pub syscon_offset: u32,

    /// Scratch register file offset.
    pub scratch_offset: u32,

    /// Number of 32-bit scratch registers.
    pub scratch_words: u32,

    /// When true, UART output goes to stderr instead of stdout.
    pub uart_to_stderr: bool,
}

impl IoConfig {
    /// Returns `(name, offset, size)` for every mapped device window, in
    /// offset order. An empty scratch file maps nothing and is left out.
    pub fn windows(&self) -> Vec<(&'static str, u32, u32)> {
        let mut windows = vec![
            ("uart", self.uart_offset, UART_WINDOW),
            ("syscon", self.syscon_offset, SYSCON_WINDOW),
            (
                "scratch",
                self.scratch_offset,
                self.scratch_words.saturating_mul(WORD_BYTES),
            ),
        ];
        windows.retain(|&(_, _, size)| size > 0);
        windows.sort_by_key(|&(_, offset, _)| offset);
        windows
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let windows = self.windows();
        for &(name, offset, size) in &windows {
            if offset % WORD_BYTES != 0 {
                return Err(ConfigError::IoMisaligned { name, offset });
            }
            if offset.checked_add(size).is_none_or(|end| end > IO_SIZE) {
                return Err(ConfigError::IoWindowOutOfRange { name, offset, size });
            }
        }
        for pair in windows.windows(2) {
            let (first, lo, lo_size) = pair[0];
            let (second, hi, _) = pair[1];
            if lo + lo_size > hi {
                return Err(ConfigError::IoOverlap { first, second });
            }
        }
        Ok(())
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            uart_offset: defaults::UART_OFFSET,
            syscon_offset: defaults::SYSCON_OFFSET,
            scratch_offset: defaults::SCRATCH_OFFSET,
            scratch_words: defaults::SCRATCH_WORDS,
            uart_to_stderr: false,
        }
    }
}
