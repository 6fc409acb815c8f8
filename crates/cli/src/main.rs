//! Memory-unit simulator CLI.
//!
//! This binary provides the command-line entry points for the simulator. It performs:
//! 1. **Trace run:** Replay a JSON request trace against a program image and report responses.
//! 2. **Decode:** Show which destination and offset an address decodes to.
//!
//! Logging goes to stderr and is filtered with `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mmu_core::common::SimError;
use mmu_core::config::Config;
use mmu_core::core::units::AddressDecoder;
use mmu_core::sim::loader::{self, ProgramImage};
use mmu_core::sim::trace::{self, parse_u32};
use mmu_core::sim::{CycleRecord, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "mmu-sim",
    author,
    version,
    about = "Cycle-level memory-management unit simulator",
    long_about = "Replay data-port request traces against the memory unit, or decode addresses.\n\nExamples:\n  mmu-sim run --trace accesses.json\n  mmu-sim run --trace accesses.json --rom boot.bin --config sim.json\n  mmu-sim decode 0x80000010"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a request trace and print statistics.
    Run {
        /// JSON request trace.
        #[arg(short, long)]
        trace: PathBuf,

        /// Program image (flat binary or ELF) for the instruction store.
        #[arg(short, long)]
        rom: Option<PathBuf>,

        /// JSON configuration; built-in defaults when absent.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print every completed access (same as `general.trace_accesses`).
        #[arg(long)]
        accesses: bool,
    },

    /// Print the destination and relative offset of an address.
    Decode {
        /// Address in hex (`0x...`), binary (`0b...`) or decimal.
        address: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            trace,
            rom,
            config,
            accesses,
        } => cmd_run(&trace, rom.as_deref(), config.as_deref(), accesses),
        Commands::Decode { address } => Ok(cmd_decode(&address)),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            process::exit(1);
        }
    }
}

/// Loads configuration, image and trace, replays the trace and reports.
///
/// Returns the SysCon exit code, or 0 when the trace ran to completion.
fn cmd_run(
    trace_path: &Path,
    rom: Option<&Path>,
    config_path: Option<&Path>,
    accesses: bool,
) -> Result<i32, SimError> {
    let config = match config_path {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let image = match rom {
        Some(path) => loader::load_image(path)?,
        None => ProgramImage::default(),
    };
    let entries = trace::parse_trace(&fs::read_to_string(trace_path)?)?;

    println!(
        "Configuration: RAM {} KiB  max_cycles {}  trace {}",
        config.memory.ram_size / 1024,
        config
            .general
            .max_cycles
            .map_or_else(|| "none".to_string(), |n| n.to_string()),
        trace_path.display()
    );

    let mut sim = Simulator::new(&config, &image)?;
    let run = sim.run_trace(&entries);
    info!(
        "trace replayed: {} entries, {} edges",
        entries.len(),
        run.records.len()
    );

    if accesses || config.general.trace_accesses {
        for record in run.records.iter().filter(|r| !r.is_idle()) {
            println!("{}", format_record(record));
        }
    }

    let code = run.exit.map_or(0, |code| {
        println!("\n[*] Exit code {code}");
        code as i32
    });
    sim.stats.print();
    Ok(code)
}

/// Renders one completed access on a single line.
fn format_record(record: &CycleRecord) -> String {
    let req = &record.request;
    let dest = record
        .response
        .destination
        .map_or_else(|| "-".to_string(), |d| d.to_string());
    format!(
        "[{:>6}] pc={:#010x} {} {:#010x} mask={} {} -> {:<7} data={}",
        record.cycle,
        record.pc,
        if req.write_enable { "W" } else { "R" },
        req.address,
        req.mask,
        if req.signed { "s" } else { "u" },
        dest,
        if req.write_enable {
            format!("{:#010x}", req.write_data)
        } else {
            record.response.data.to_string()
        }
    )
}

fn cmd_decode(text: &str) -> i32 {
    let Some(address) = parse_u32(text) else {
        eprintln!("Error: '{text}' is not a 32-bit address");
        return 1;
    };
    let decoded = AddressDecoder::decode(address);
    match decoded.offset() {
        Some(offset) => println!(
            "{address:#010x} -> {} offset {offset:#x}",
            decoded.destination()
        ),
        None => println!("{address:#010x} -> {}", decoded.destination()),
    }
    0
}
