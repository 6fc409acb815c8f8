//! System construction and top-level `System` type.
//!
//! This module builds the three collaborators of the memory unit from
//! configuration. It performs:
//! 1. **Instruction store:** Filled from the program image.
//! 2. **Main memory:** Allocated at the configured backing size and seeded
//!    with the image's main-memory segments.
//! 3. **I/O block:** UART, SysCon and scratch registers at their configured offsets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::error::SimError;
use crate::config::Config;
use crate::sim::loader::ProgramImage;
use crate::soc::devices::syscon::NO_EXIT;
use crate::soc::devices::{Scratch, SysCon, Uart};
use crate::soc::io::IoBlock;
use crate::soc::memory::MainMemory;
use crate::soc::rom::InstructionRom;
use crate::soc::traits::{InstructionPort, IoPort, MemoryPort};

/// The collaborators behind the memory unit's three ports.
///
/// Ports are boxed so tests can substitute recording implementations.
pub struct System {
    /// Instruction store behind the instruction port.
    pub rom: Box<dyn InstructionPort>,
    /// Main-memory bank behind the data port.
    pub ram: Box<dyn MemoryPort>,
    /// I/O block behind the I/O port.
    pub io: Box<dyn IoPort>,
    /// Atomic exit code: when not `u64::MAX`, simulation should stop and use this as exit code.
    pub exit_request: Arc<AtomicU64>,
    /// Every byte written to the UART.
    console: Arc<Mutex<Vec<u8>>>,
}

impl System {
    /// Builds a system from configuration and loads `image` into it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration is invalid,
    /// [`SimError::Load`] if the image does not fit the instruction store and
    /// [`SimError::Io`] if main memory cannot be allocated.
    pub fn new(config: &Config, image: &ProgramImage) -> Result<Self, SimError> {
        config.validate()?;

        let rom = InstructionRom::from_image(&image.rom)?;

        let mut ram = MainMemory::new(config.memory.ram_size)?;
        for (offset, bytes) in &image.ram {
            ram.load(*offset, bytes);
        }

        let exit_request = Arc::new(AtomicU64::new(NO_EXIT));
        let console = Arc::new(Mutex::new(Vec::new()));

        let mut io = IoBlock::new();
        io.add_device(Box::new(Uart::new(
            config.io.uart_offset,
            config.io.uart_to_stderr,
            Arc::clone(&console),
        )));
        io.add_device(Box::new(SysCon::new(
            config.io.syscon_offset,
            Arc::clone(&exit_request),
        )));
        if config.io.scratch_words > 0 {
            io.add_device(Box::new(Scratch::new(
                config.io.scratch_offset,
                config.io.scratch_words,
            )));
        }

        Ok(Self {
            rom: Box::new(rom),
            ram: Box::new(ram),
            io: Box::new(io),
            exit_request,
            console,
        })
    }

    /// Assembles a system from caller-supplied ports.
    pub fn with_ports(
        rom: Box<dyn InstructionPort>,
        ram: Box<dyn MemoryPort>,
        io: Box<dyn IoPort>,
    ) -> Self {
        Self {
            rom,
            ram,
            io,
            exit_request: Arc::new(AtomicU64::new(NO_EXIT)),
            console: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the requested exit code if a device has requested shutdown.
    pub fn check_exit(&self) -> Option<u64> {
        let val = self.exit_request.load(Ordering::Relaxed);
        if val == NO_EXIT { None } else { Some(val) }
    }

    /// Returns a copy of everything written to the UART so far.
    pub fn console_output(&self) -> Vec<u8> {
        self.console
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("ram_size", &self.ram.size())
            .field("exit", &self.check_exit())
            .finish_non_exhaustive()
    }
}
