//! Simulation statistics collection and reporting.
//!
//! This module tracks what the memory unit did during a run. It provides:
//! 1. **Cycles:** Total clock edges and host throughput.
//! 2. **Access mix:** Reads and writes per destination, instruction fetches.
//! 3. **Contract violations:** `Unknown` accesses and illegal byte-enable masks.

use std::fmt;
use std::time::Instant;

use crate::common::data::{AccessType, Destination};

/// Read and write counters for one destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessCounts {
    /// Loads.
    pub reads: u64,
    /// Stores.
    pub writes: u64,
}

impl AccessCounts {
    /// Total accesses.
    pub const fn total(&self) -> u64 {
        self.reads + self.writes
    }
}

/// Statistics for one simulation run.
#[derive(Clone, Debug)]
pub struct MmuStats {
    start_time: Instant,
    /// Clock edges since the run started.
    pub cycles: u64,
    /// Instruction fetches issued (one per cycle).
    pub fetches: u64,
    /// Accesses to the instruction store from the data side.
    pub rom: AccessCounts,
    /// Accesses to main memory.
    pub ram: AccessCounts,
    /// Accesses to the I/O block.
    pub io: AccessCounts,
    /// Accesses outside every window.
    pub unknown: AccessCounts,
    /// Requests whose byte-enable mask was not one of the legal patterns.
    pub illegal_masks: u64,
}

impl Default for MmuStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            fetches: 0,
            rom: AccessCounts::default(),
            ram: AccessCounts::default(),
            io: AccessCounts::default(),
            unknown: AccessCounts::default(),
            illegal_masks: 0,
        }
    }
}

impl MmuStats {
    /// Records one access of `kind` to `destination`.
    pub const fn record(&mut self, destination: Destination, kind: AccessType) {
        let counts = match destination {
            Destination::InstructionStore => &mut self.rom,
            Destination::MainMemory => &mut self.ram,
            Destination::IoPort => &mut self.io,
            Destination::Unknown => &mut self.unknown,
        };
        match kind {
            AccessType::Fetch => self.fetches += 1,
            AccessType::Read => counts.reads += 1,
            AccessType::Write => counts.writes += 1,
        }
    }

    /// Returns the counters for `destination`.
    pub const fn counts(&self, destination: Destination) -> AccessCounts {
        match destination {
            Destination::InstructionStore => self.rom,
            Destination::MainMemory => self.ram,
            Destination::IoPort => self.io,
            Destination::Unknown => self.unknown,
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for MmuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        writeln!(f, "\n==========================================================")?;
        writeln!(f, "MEMORY UNIT SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_freq                 {khz:.2} kHz")?;
        writeln!(f, "sim_fetches              {}", self.fetches)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "DATA ACCESSES")?;
        for (name, counts) in [
            ("rom", self.rom),
            ("ram", self.ram),
            ("io", self.io),
            ("unknown", self.unknown),
        ] {
            writeln!(
                f,
                "  {:<8} reads {:>10}  writes {:>10}  ({:.2}% of cycles)",
                name,
                counts.reads,
                counts.writes,
                (counts.total() as f64 / cyc) * 100.0
            )?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CONTRACT VIOLATIONS")?;
        writeln!(f, "  accesses.unknown       {}", self.unknown.total())?;
        writeln!(f, "  masks.illegal          {}", self.illegal_masks)?;
        write!(f, "==========================================================")
    }
}
