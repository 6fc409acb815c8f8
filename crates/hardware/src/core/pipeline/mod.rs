//! One-cycle memory pipeline.
//!
//! This module contains the state and wiring of the memory unit's single
//! pipeline stage:
//! 1. **Latches:** The pipeline register and its reset state machine.
//! 2. **Signals:** Requests, responses and the signals driven onto each port.

/// Pipeline register and its snapshot.
pub mod latches;

/// Requests, responses and port signals.
pub mod signals;

pub use latches::{PipelineRegister, PipelineSnapshot, RegisterState};
pub use signals::{IoSignals, MemorySignals, PortSignals, Request, Response};
