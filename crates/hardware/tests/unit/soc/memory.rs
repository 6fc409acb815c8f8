//! Main-Memory Bank Tests.
//!
//! Verifies the backing buffer, read-before-write timing, per-lane writes and
//! offset wrapping beyond the backing size.

use mmu_core::common::ByteEnable;
use mmu_core::core::pipeline::MemorySignals;
use mmu_core::soc::memory::buffer::DramBuffer;
use mmu_core::soc::{MainMemory, MemoryPort};
use rstest::rstest;

fn write(offset: u32, data: u32, lanes: ByteEnable) -> MemorySignals {
    MemorySignals {
        offset,
        write_lanes: lanes,
        write_data: data,
        write_enable: true,
    }
}

fn read(offset: u32) -> MemorySignals {
    MemorySignals {
        offset,
        ..MemorySignals::default()
    }
}

#[test]
fn buffer_starts_zeroed() {
    let buffer = DramBuffer::new(4096).unwrap();
    assert_eq!(buffer.len(), 4096);
    assert!(!buffer.is_empty());
    assert!(buffer.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn buffer_words_are_little_endian() {
    let mut buffer = DramBuffer::new(16).unwrap();
    buffer.write_slice(4, &[0x78, 0x56, 0x34, 0x12]);
    assert_eq!(buffer.read_u32(4), 0x1234_5678);
    assert_eq!(buffer.read_u32(0), 0);
}

#[test]
fn size_rounds_up_to_power_of_two() {
    assert_eq!(MainMemory::new(3000).unwrap().size(), 4096);
    assert_eq!(MainMemory::new(0).unwrap().size(), 4);
    assert_eq!(MainMemory::new(1 << 16).unwrap().size(), 1 << 16);
}

#[test]
fn read_returns_old_word_on_write_edge() {
    let mut ram = MainMemory::new(256).unwrap();
    ram.clock(&write(0x10, 0xAAAA_AAAA, ByteEnable::WORD));
    assert_eq!(ram.read_data(), 0);

    ram.clock(&write(0x10, 0xBBBB_BBBB, ByteEnable::WORD));
    assert_eq!(ram.read_data(), 0xAAAA_AAAA);

    ram.clock(&read(0x10));
    assert_eq!(ram.read_data(), 0xBBBB_BBBB);
}

#[rstest]
#[case(ByteEnable::BYTE0, 0xFFFF_FF00)]
#[case(ByteEnable::BYTE3, 0x00FF_FFFF)]
#[case(ByteEnable::HALF_UPPER, 0x0000_FFFF)]
#[case(ByteEnable::HALF_LOWER, 0xFFFF_0000)]
#[case(ByteEnable::WORD, 0x0000_0000)]
fn only_enabled_lanes_change(#[case] lanes: ByteEnable, #[case] expected: u32) {
    let mut ram = MainMemory::new(256).unwrap();
    ram.clock(&write(0, 0xFFFF_FFFF, ByteEnable::WORD));
    ram.clock(&write(0, 0, lanes));
    assert_eq!(ram.peek(0), expected);
}

#[test]
fn read_does_not_write_even_with_lanes_set() {
    let mut ram = MainMemory::new(256).unwrap();
    ram.clock(&write(8, 0x1234_5678, ByteEnable::WORD));
    ram.clock(&MemorySignals {
        write_enable: false,
        ..write(8, 0, ByteEnable::WORD)
    });
    assert_eq!(ram.peek(8), 0x1234_5678);
}

#[test]
fn offsets_wrap_modulo_backing_size() {
    let mut ram = MainMemory::new(1024).unwrap();
    ram.clock(&write(1024 + 12, 0xCAFE_F00D, ByteEnable::WORD));
    assert_eq!(ram.peek(12), 0xCAFE_F00D);

    ram.clock(&read(3 * 1024 + 12));
    assert_eq!(ram.read_data(), 0xCAFE_F00D);
}

#[test]
fn unaligned_offset_selects_containing_word() {
    let mut ram = MainMemory::new(256).unwrap();
    ram.clock(&write(0x23, 0xAB00_0000, ByteEnable::BYTE3));
    assert_eq!(ram.peek(0x20), 0xAB00_0000);
}

#[test]
fn load_places_bytes_and_wraps() {
    let mut ram = MainMemory::new(64).unwrap();
    ram.load(4, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(ram.peek(4), 0x0403_0201);
    assert_eq!(ram.peek(8), 0x0000_0605);

    ram.load(62, &[0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(ram.peek(60), 0xBBAA_0000);
    assert_eq!(ram.peek(0), 0x0000_DDCC);
}
