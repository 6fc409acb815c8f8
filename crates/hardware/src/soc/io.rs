//! I/O port block.
//!
//! This module implements the 256-byte block behind the I/O port. It provides:
//! 1. **Device registration:** Devices are added by window and sorted for lookup.
//! 2. **Access routing:** Each clocked access goes to the device whose window
//!    holds the offset, with a last-device hint for repeated accesses.
//! 3. **Registered outputs:** Read data, enable and write strobe as sampled
//!    at the last edge.
//!
//! Offsets no device claims read as zero and ignore writes.

use tracing::{info, trace};

use crate::common::constants::WORD_BYTES;
use crate::core::pipeline::signals::IoSignals;
use crate::soc::devices::IoDevice;
use crate::soc::traits::IoPort;

/// Memory-mapped I/O block routing to registered devices.
#[derive(Default)]
pub struct IoBlock {
    devices: Vec<Box<dyn IoDevice>>,
    last_device_idx: usize,
    read_data: u32,
    enabled: bool,
    write_strobe: bool,
}

impl IoBlock {
    /// Creates an empty block; add devices with `add_device`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device; devices are sorted by window offset for lookup.
    pub fn add_device(&mut self, dev: Box<dyn IoDevice>) {
        let (offset, size) = dev.address_range();
        info!(
            "io: {} at {:#04x}..{:#04x}",
            dev.name(),
            offset,
            offset + size
        );
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Returns the names of the registered devices in window order.
    pub fn device_names(&self) -> Vec<&'static str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    fn find_device(&mut self, offset: u32) -> Option<(&mut Box<dyn IoDevice>, u32)> {
        let hit = |dev: &dyn IoDevice| {
            let (start, size) = dev.address_range();
            offset >= start && offset - start < size
        };

        if self.last_device_idx < self.devices.len()
            && hit(self.devices[self.last_device_idx].as_ref())
        {
            let start = self.devices[self.last_device_idx].address_range().0;
            return Some((&mut self.devices[self.last_device_idx], offset - start));
        }

        let idx = self.devices.iter().position(|d| hit(d.as_ref()))?;
        self.last_device_idx = idx;
        let start = self.devices[idx].address_range().0;
        Some((&mut self.devices[idx], offset - start))
    }
}

impl std::fmt::Debug for IoBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoBlock")
            .field("devices", &self.device_names())
            .field("read_data", &self.read_data)
            .field("enabled", &self.enabled)
            .field("write_strobe", &self.write_strobe)
            .finish()
    }
}

impl IoPort for IoBlock {
    fn clock(&mut self, signals: &IoSignals) {
        self.enabled = signals.enable;
        self.write_strobe = signals.write_strobe();
        if !signals.enable {
            self.read_data = 0;
            return;
        }

        let word = u32::from(signals.offset) & !(WORD_BYTES - 1);
        let write = self.write_strobe;
        self.read_data = match self.find_device(word) {
            Some((dev, rel)) => {
                let old = dev.read_u32(rel);
                if write {
                    dev.write_u32(rel, signals.write_data, signals.write_lanes);
                }
                old
            }
            None => 0,
        };
        trace!(
            offset = format_args!("{:#04x}", signals.offset),
            write,
            data = format_args!("{:#010x}", self.read_data),
            "io access"
        );
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn write_strobe(&self) -> bool {
        self.write_strobe
    }

    fn tick(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }

    fn flush(&mut self) {
        for dev in &mut self.devices {
            dev.flush();
        }
    }
}
