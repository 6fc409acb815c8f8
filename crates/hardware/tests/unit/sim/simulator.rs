//! Simulator Tests.
//!
//! Replays traces end to end: idle gaps, fetch addresses, console output,
//! SysCon exit requests and the cycle limit.

use mmu_core::common::constants::NOP;
use mmu_core::common::{ByteEnable, Destination, LoadValue};
use mmu_core::config::Config;
use mmu_core::core::pipeline::Request;
use mmu_core::sim::loader::ProgramImage;
use mmu_core::sim::trace::parse_trace;
use pretty_assertions::assert_eq;

use crate::common::harness::{TEST_RAM_SIZE, TestContext};

const SYSCON: u32 = 0x8000_0010;
const UART: u32 = 0x8000_0000;

fn config(max_cycles: Option<u64>) -> Config {
    let mut config = Config::default();
    config.memory.ram_size = TEST_RAM_SIZE;
    config.general.max_cycles = max_cycles;
    config.io.uart_to_stderr = true;
    config
}

#[test]
fn idle_gap_precedes_request() {
    let mut ctx = TestContext::new();
    let trace = parse_trace(
        r#"[
            { "addr": "0x10000000", "data": "0xdeadbeef", "write": true },
            { "addr": "0x10000000", "idle": 151 }
        ]"#,
    )
    .unwrap();

    let run = ctx.sim.run_trace(&trace);
    assert_eq!(run.exit, None);
    assert_eq!(run.records.len(), 153);
    assert!(run.records[1..152].iter().all(|r| r.is_idle()));

    let last = run.records.last().unwrap();
    assert_eq!(last.cycle, 153);
    assert_eq!(last.response.data, LoadValue::Defined(0xDEAD_BEEF));
    assert_eq!(ctx.sim.stats.ram.reads, 1);
    assert_eq!(ctx.sim.stats.ram.writes, 1);
}

#[test]
fn idle_edges_report_unknown_and_unspecified() {
    let mut ctx = TestContext::new();
    let record = ctx.sim.idle();
    assert!(record.is_idle());
    assert_eq!(record.response.destination, Some(Destination::Unknown));
    assert_eq!(record.response.data, LoadValue::Unspecified);
    assert_eq!(ctx.sim.stats.unknown.total(), 0);
}

#[test]
fn fetch_address_is_held_between_entries() {
    let words = [0x0000_0093, 0x0010_0113, 0x0020_0193];
    let mut ctx = TestContext::with_rom(&words);
    let trace = parse_trace(
        r#"[
            { "addr": "0xffffffff", "pc": 8 },
            { "addr": "0xffffffff" },
            { "addr": "0xffffffff", "pc": "0x4" }
        ]"#,
    )
    .unwrap();

    let run = ctx.sim.run_trace(&trace);
    let fetched: Vec<u32> = run.records.iter().map(|r| r.instruction).collect();
    assert_eq!(fetched, vec![words[2], words[2], words[1]]);
    assert_eq!(ctx.sim.pc(), 4);
}

#[test]
fn image_entry_sets_first_fetch() {
    let mut rom = vec![0u8; 16];
    rom[12..].copy_from_slice(&0x0000_006Fu32.to_le_bytes());
    let image = ProgramImage {
        entry: 12,
        ..ProgramImage::flat(rom).unwrap()
    };
    let mut ctx = TestContext::with_image(&image);
    assert_eq!(ctx.sim.idle().instruction, 0x0000_006F);
}

#[test]
fn syscon_power_off_stops_the_run() {
    let mut ctx = TestContext::with_config(&config(None), &ProgramImage::default());
    let trace = parse_trace(
        r#"[
            { "addr": "0x80000000", "data": 72, "mask": "0b0001", "write": true },
            { "addr": "0x80000000", "data": 105, "mask": "0b0001", "write": true },
            { "addr": "0x80000010", "data": "0x5555", "write": true },
            { "addr": "0x10000000", "data": 1, "write": true }
        ]"#,
    )
    .unwrap();

    let run = ctx.sim.run_trace(&trace);
    assert_eq!(run.exit, Some(0));
    assert_eq!(run.records.len(), 3);
    assert_eq!(ctx.peek_ram(0), 0);
    assert_eq!(ctx.sim.system.console_output(), b"Hi");
    assert_eq!(ctx.sim.take_exit(), None);
}

#[test]
fn syscon_failure_reports_code_one() {
    let mut ctx = TestContext::with_config(&config(None), &ProgramImage::default());
    let _ = ctx.write(SYSCON, 0x3333, ByteEnable::HALF_LOWER);
    assert_eq!(ctx.sim.system.check_exit(), Some(1));
    assert_eq!(ctx.sim.take_exit(), Some(1));
    assert_eq!(ctx.sim.system.check_exit(), None);
}

#[test]
fn cycle_limit_counts_idle_edges() {
    let mut ctx = TestContext::with_config(&config(Some(5)), &ProgramImage::default());
    let trace = parse_trace(
        r#"[
            { "addr": "0x10000000", "data": 1, "write": true, "idle": 2 },
            { "addr": "0x10000004", "data": 2, "write": true, "idle": 2 }
        ]"#,
    )
    .unwrap();

    let run = ctx.sim.run_trace(&trace);
    assert_eq!(run.exit, None);
    assert_eq!(run.records.len(), 5);
    assert_eq!(ctx.sim.stats.cycles, 5);
    assert_eq!(ctx.peek_ram(0), 1);
    assert_eq!(ctx.peek_ram(4), 0);
}

#[test]
fn uart_status_and_io_round_trip() {
    let mut ctx = TestContext::with_config(&config(None), &ProgramImage::default());
    assert_eq!(ctx.read_word(UART + 4), LoadValue::Defined(1));

    let _ = ctx.write(0x8000_0082, 0x0000_BEEF, ByteEnable::HALF_UPPER);
    assert_eq!(
        ctx.read(0x8000_0080, ByteEnable::HALF_UPPER, true),
        LoadValue::Defined(0xFFFF_BEEF)
    );
    assert_eq!(ctx.read_word(0x8000_0080), LoadValue::Defined(0xBEEF_0000));
    assert_eq!(ctx.read_word(0x8000_0040), LoadValue::Defined(0));
}

#[test]
fn reset_restores_nop_and_clears_stats() {
    let mut ctx = TestContext::with_rom(&[0x0000_0093]);
    let _ = ctx.write_word(0x1000_0000, 0x1234_5678);
    ctx.sim.reset();

    assert_eq!(ctx.sim.mmu.instruction(&ctx.sim.system), NOP);
    assert_eq!(ctx.sim.stats.cycles, 0);
    assert_eq!(ctx.peek_ram(0), 0x1234_5678);

    let record = ctx.sim.step(0, &Request::read(0x1000_0000, ByteEnable::WORD, false));
    assert_eq!(record.cycle, 1);
    assert_eq!(record.response.data, LoadValue::Defined(0x1234_5678));
}
