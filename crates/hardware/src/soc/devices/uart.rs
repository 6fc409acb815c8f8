//! Transmit-only serial port.
//!
//! # Registers
//!
//! * `0x00`: Transmit Holding Register (write: low byte is sent; read: 0)
//! * `0x04`: Line Status Register (read: always 1, transmitter ready)
//!
//! Output is buffered and flushed to stdout (or stderr) on newline, when the
//! buffer fills, and on drop. Every transmitted byte is also appended to a
//! shared transcript so tests and the CLI can inspect the output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::data::ByteEnable;
use crate::config::UART_WINDOW;
use crate::soc::devices::IoDevice;

/// Transmit Holding Register.
const REG_THR: u32 = 0;
/// Line Status Register.
const REG_LSR: u32 = 4;

/// Line Status Register value: transmitter ready.
const LSR_READY: u32 = 1;

/// Threshold for flushing the transmit buffer (4 KiB).
const TX_BUFFER_FLUSH_THRESHOLD: usize = 4096;

/// UART device structure.
#[derive(Debug)]
pub struct Uart {
    /// Offset of the device inside the I/O block.
    offset: u32,
    /// Bytes not yet flushed to the host.
    tx_buffer: Vec<u8>,
    /// Every byte transmitted since creation, shared with the system.
    transcript: Arc<Mutex<Vec<u8>>>,
    /// When true, output goes to stderr.
    to_stderr: bool,
}

impl Uart {
    /// Creates a new UART at `offset`, appending output to `transcript`.
    pub const fn new(offset: u32, to_stderr: bool, transcript: Arc<Mutex<Vec<u8>>>) -> Self {
        Self {
            offset,
            tx_buffer: Vec::new(),
            transcript,
            to_stderr,
        }
    }

    /// Writes the transmit buffer to stdout or stderr.
    fn flush_buffer(&mut self) {
        if self.tx_buffer.is_empty() {
            return;
        }
        let result = if self.to_stderr {
            let mut err = io::stderr().lock();
            err.write_all(&self.tx_buffer).and_then(|()| err.flush())
        } else {
            let mut out = io::stdout().lock();
            out.write_all(&self.tx_buffer).and_then(|()| out.flush())
        };
        if let Err(e) = result {
            tracing::warn!("uart: host write failed: {e}");
        }
        self.tx_buffer.clear();
    }

    fn transmit(&mut self, byte: u8) {
        self.tx_buffer.push(byte);
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(byte);
        if byte == b'\n' || self.tx_buffer.len() >= TX_BUFFER_FLUSH_THRESHOLD {
            self.flush_buffer();
        }
    }
}

impl IoDevice for Uart {
    fn name(&self) -> &'static str {
        "uart"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.offset, UART_WINDOW)
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            REG_LSR => LSR_READY,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32, lanes: ByteEnable) {
        if offset == REG_THR && lanes.lane(0) {
            self.transmit(val as u8);
        }
    }

    fn flush(&mut self) {
        self.flush_buffer();
    }
}

impl Drop for Uart {
    fn drop(&mut self) {
        self.flush_buffer();
    }
}
