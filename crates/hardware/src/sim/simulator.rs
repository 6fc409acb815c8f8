//! Simulator: owns the memory unit and its collaborators side by side.
//!
//! The simulator advances the unit one edge per call, records statistics,
//! and replays request traces until they end, a SysCon exit is requested, or
//! the configured cycle limit is reached.

use std::sync::atomic::Ordering;

use tracing::info;

use crate::common::data::{AccessType, Destination, LoadValue};
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Mmu;
use crate::core::pipeline::signals::{IDLE_ADDRESS, Request, Response};
use crate::sim::loader::ProgramImage;
use crate::sim::trace::TraceEntry;
use crate::soc::System;
use crate::soc::devices::syscon::NO_EXIT;
use crate::stats::MmuStats;

/// What happened at one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleRecord {
    /// Edge number, starting at 1.
    pub cycle: u64,
    /// Fetch address presented at this edge.
    pub pc: u32,
    /// Data request presented at this edge.
    pub request: Request,
    /// Result of `request`, visible until the next edge.
    pub response: Response,
    /// Instruction word fetched at this edge.
    pub instruction: u32,
}

impl CycleRecord {
    /// Returns whether the request addressed nothing on purpose.
    pub const fn is_idle(&self) -> bool {
        is_idle(&self.request)
    }
}

/// Outcome of a trace run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceRun {
    /// One record per edge, idle edges included.
    pub records: Vec<CycleRecord>,
    /// Exit code requested through the SysCon, if any.
    pub exit: Option<u64>,
}

const fn is_idle(request: &Request) -> bool {
    request.address == IDLE_ADDRESS && !request.write_enable
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The memory-management unit.
    pub mmu: Mmu,
    /// Collaborators behind the unit's ports.
    pub system: System,
    /// Statistics for the current run.
    pub stats: MmuStats,
    max_cycles: Option<u64>,
    pc: u32,
}

impl Simulator {
    /// Builds a system from `config`, loads `image` and places the unit in reset.
    ///
    /// # Errors
    ///
    /// See [`System::new`].
    pub fn new(config: &Config, image: &ProgramImage) -> Result<Self, SimError> {
        let system = System::new(config, image)?;
        let mut sim = Self::from_system(system);
        sim.max_cycles = config.general.max_cycles;
        sim.pc = image.entry;
        Ok(sim)
    }

    /// Wraps an existing system with no cycle limit, fetching from address 0.
    pub fn from_system(system: System) -> Self {
        Self {
            mmu: Mmu::new(),
            system,
            stats: MmuStats::default(),
            max_cycles: None,
            pc: 0,
        }
    }

    /// Returns the fetch address used when a step does not supply one.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Advances one edge.
    pub fn step(&mut self, fetch_pc: u32, request: &Request) -> CycleRecord {
        self.pc = fetch_pc;
        let decoded = self.mmu.step(&mut self.system, fetch_pc, request);
        let destination = decoded.destination();

        self.stats.cycles += 1;
        self.stats.record(destination, AccessType::Fetch);
        if !is_idle(request) {
            let kind = if request.write_enable {
                AccessType::Write
            } else {
                AccessType::Read
            };
            self.stats.record(destination, kind);
            if matches!(destination, Destination::MainMemory | Destination::IoPort)
                && !request.mask.is_legal()
            {
                self.stats.illegal_masks += 1;
            }
        }

        CycleRecord {
            cycle: self.mmu.cycles(),
            pc: fetch_pc,
            request: *request,
            response: self.mmu.response(&self.system),
            instruction: self.mmu.instruction(&self.system),
        }
    }

    /// Advances one edge with no data access.
    pub fn idle(&mut self) -> CycleRecord {
        self.step(self.pc, &Request::idle())
    }

    /// Performs a load and returns its result.
    pub fn load(&mut self, request: &Request) -> LoadValue {
        self.step(self.pc, request).response.data
    }

    /// Replays `trace`, one request per edge after any idle gap.
    pub fn run_trace(&mut self, trace: &[TraceEntry]) -> TraceRun {
        let mut run = TraceRun::default();
        'entries: for entry in trace {
            let pc = entry.pc.unwrap_or(self.pc);
            let idle = Request::idle();
            let request = entry.request();
            let gap = std::iter::repeat_n(&idle, entry.idle as usize);
            for request in gap.chain(std::iter::once(&request)) {
                if self.limit_reached() {
                    info!("cycle limit reached after {} cycles", self.stats.cycles);
                    break 'entries;
                }
                run.records.push(self.step(pc, request));
                if let Some(code) = self.take_exit() {
                    info!("exit requested with code {code}");
                    run.exit = Some(code);
                    break 'entries;
                }
            }
        }
        self.system.io.flush();
        run
    }

    fn limit_reached(&self) -> bool {
        self.max_cycles.is_some_and(|max| self.stats.cycles >= max)
    }

    /// Retrieves and clears the exit code if the simulation has finished.
    pub fn take_exit(&mut self) -> Option<u64> {
        let code = self.system.exit_request.swap(NO_EXIT, Ordering::Relaxed);
        (code != NO_EXIT).then_some(code)
    }

    /// Returns the unit to reset and clears the statistics. Port contents are kept.
    pub fn reset(&mut self) {
        self.mmu.reset();
        self.stats = MmuStats::default();
    }
}
