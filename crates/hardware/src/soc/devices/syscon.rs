//! System Controller (SysCon).
//!
//! A one-register device used by programs and traces to end the simulation.
//!
//! # Registers
//!
//! * `0x00`: Command Register (write only, reads as zero)
//!   * `0x5555`: Power off, exit code 0
//!   * `0x3333`: Failure, exit code 1

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::common::data::ByteEnable;
use crate::config::SYSCON_WINDOW;
use crate::soc::devices::IoDevice;

/// Command that ends the run successfully.
pub const POWER_OFF: u32 = 0x5555;

/// Command that ends the run with a failure code.
pub const FAILURE: u32 = 0x3333;

/// Value of the exit signal while no exit has been requested.
pub const NO_EXIT: u64 = u64::MAX;

/// SysCon device structure.
#[derive(Debug)]
pub struct SysCon {
    /// Offset of the device inside the I/O block.
    offset: u32,
    /// Shared exit code; [`NO_EXIT`] until a command is written.
    exit_signal: Arc<AtomicU64>,
}

impl SysCon {
    /// Creates a new SysCon at `offset`, signalling through `exit_signal`.
    pub const fn new(offset: u32, exit_signal: Arc<AtomicU64>) -> Self {
        Self {
            offset,
            exit_signal,
        }
    }
}

impl IoDevice for SysCon {
    fn name(&self) -> &'static str {
        "syscon"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.offset, SYSCON_WINDOW)
    }

    fn read_u32(&mut self, _offset: u32) -> u32 {
        0
    }

    fn write_u32(&mut self, offset: u32, val: u32, lanes: ByteEnable) {
        if offset != 0 {
            return;
        }
        // Commands are 16 bits wide; a half or word store carries them.
        match lanes.merge(0, val) & 0xFFFF {
            POWER_OFF => {
                info!("syscon: power off");
                self.exit_signal.store(0, Ordering::Relaxed);
            }
            FAILURE => {
                info!("syscon: failure");
                self.exit_signal.store(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}
