//! Pipeline register between request and response.
//!
//! The register is the only stateful element of the data path. At every
//! clock edge it captures the decode result of the current request; during
//! the following cycle that snapshot steers the load result unpacker.

use tracing::debug;

use crate::common::data::{ByteEnable, Destination};

/// Decode result captured at a clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineSnapshot {
    /// Destination selected for the request.
    pub destination: Destination,
    /// Byte-enable mask of the request.
    pub mask: ByteEnable,
    /// Sign flag of the request.
    pub signed: bool,
}

/// State of the pipeline register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterState {
    /// After reset, before the first edge. Outputs are forced to defaults.
    #[default]
    Uninitialized,
    /// Holds the decode result of the previous cycle.
    Running(PipelineSnapshot),
}

/// One-slot delay register.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineRegister {
    state: RegisterState,
}

impl PipelineRegister {
    /// Creates a register in reset.
    pub const fn new() -> Self {
        Self {
            state: RegisterState::Uninitialized,
        }
    }

    /// Returns to `Uninitialized`.
    pub fn reset(&mut self) {
        if self.is_running() {
            debug!("pipeline register reset");
        }
        self.state = RegisterState::Uninitialized;
    }

    /// Overwrites the snapshot at a clock edge.
    pub fn latch(&mut self, snapshot: PipelineSnapshot) {
        if !self.is_running() {
            debug!("pipeline register running");
        }
        self.state = RegisterState::Running(snapshot);
    }

    /// Returns the current state.
    pub const fn state(&self) -> RegisterState {
        self.state
    }

    /// Returns the latched snapshot, or `None` while uninitialized.
    pub const fn snapshot(&self) -> Option<PipelineSnapshot> {
        match self.state {
            RegisterState::Running(snapshot) => Some(snapshot),
            RegisterState::Uninitialized => None,
        }
    }

    /// Returns whether at least one edge has passed since reset.
    pub const fn is_running(&self) -> bool {
        matches!(self.state, RegisterState::Running(_))
    }
}
