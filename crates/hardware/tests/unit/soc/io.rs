//! I/O Block Tests.
//!
//! Drives the block directly with port signals and checks device routing,
//! registered enable/strobe outputs and reads of unmapped offsets.

use mmu_core::common::ByteEnable;
use mmu_core::core::pipeline::IoSignals;
use mmu_core::soc::devices::Scratch;
use mmu_core::soc::{IoBlock, IoPort};

fn block() -> IoBlock {
    let mut io = IoBlock::new();
    io.add_device(Box::new(Scratch::new(0x40, 4)));
    io.add_device(Box::new(Scratch::new(0x00, 2)));
    io
}

fn store(offset: u8, data: u32, lanes: ByteEnable) -> IoSignals {
    IoSignals {
        offset,
        enable: true,
        write_enable: true,
        write_lanes: lanes,
        write_data: data,
    }
}

fn load(offset: u8) -> IoSignals {
    IoSignals {
        offset,
        enable: true,
        ..IoSignals::default()
    }
}

#[test]
fn devices_sorted_by_offset() {
    assert_eq!(block().device_names(), ["scratch", "scratch"]);
}

#[test]
fn store_then_load_through_device() {
    let mut io = block();
    io.clock(&store(0x44, 0x1234_5678, ByteEnable::WORD));
    assert!(io.enabled());
    assert!(io.write_strobe());

    io.clock(&load(0x44));
    assert_eq!(io.read_data(), 0x1234_5678);
    assert!(!io.write_strobe());
}

#[test]
fn sub_word_offset_uses_containing_register() {
    let mut io = block();
    io.clock(&store(0x46, 0x00AB_0000, ByteEnable::BYTE2));
    io.clock(&load(0x44));
    assert_eq!(io.read_data(), 0x00AB_0000);
}

#[test]
fn unmapped_offsets_read_zero_and_ignore_writes() {
    let mut io = block();
    io.clock(&store(0x20, 0xFFFF_FFFF, ByteEnable::WORD));
    io.clock(&load(0x20));
    assert_eq!(io.read_data(), 0);
}

#[test]
fn disabled_port_reads_zero_and_never_strobes() {
    let mut io = block();
    io.clock(&store(0x00, 0x55, ByteEnable::WORD));
    io.clock(&IoSignals {
        enable: false,
        ..store(0x00, 0xFFFF_FFFF, ByteEnable::WORD)
    });
    assert!(!io.enabled());
    assert!(!io.write_strobe());
    assert_eq!(io.read_data(), 0);

    io.clock(&load(0x00));
    assert_eq!(io.read_data(), 0x55);
}

#[test]
fn lookups_alternate_between_devices() {
    let mut io = block();
    io.clock(&store(0x04, 1, ByteEnable::WORD));
    io.clock(&store(0x4C, 2, ByteEnable::WORD));
    io.clock(&load(0x04));
    assert_eq!(io.read_data(), 1);
    io.clock(&load(0x4C));
    assert_eq!(io.read_data(), 2);
}
