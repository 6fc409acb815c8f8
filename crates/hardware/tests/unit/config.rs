//! Configuration Tests.
//!
//! Verifies defaults, partial documents and every validation rejection.

use std::fs;

use mmu_core::common::{ConfigError, SimError};
use mmu_core::config::Config;
use rstest::rstest;

#[test]
fn defaults_validate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.io.uart_offset, 0x00);
    assert_eq!(config.io.syscon_offset, 0x10);
    assert_eq!(config.io.scratch_words, 32);
    assert!(!config.io.uart_to_stderr);
}

#[test]
fn empty_document_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.memory.ram_size, Config::default().memory.ram_size);
    assert_eq!(config.io.scratch_offset, 0x80);
}

#[test]
fn windows_sorted_by_offset() {
    let config = Config::from_json(r#"{ "io": { "uart_offset": 32, "syscon_offset": 0 } }"#)
        .unwrap();
    let names: Vec<_> = config.io.windows().iter().map(|w| w.0).collect();
    assert_eq!(names, ["syscon", "uart", "scratch"]);
}

#[rstest]
#[case(r#"{ "memory": { "ram_size": 3000 } }"#, ConfigError::RamSizeNotPowerOfTwo(3000))]
#[case(r#"{ "memory": { "ram_size": 0 } }"#, ConfigError::RamSizeNotPowerOfTwo(0))]
#[case(
    r#"{ "memory": { "ram_size": 4294967296 } }"#,
    ConfigError::RamSizeTooLarge { size: 0x1_0000_0000, max: 0x7000_0000 }
)]
#[case(
    r#"{ "io": { "syscon_offset": 18 } }"#,
    ConfigError::IoMisaligned { name: "syscon", offset: 18 }
)]
#[case(
    r#"{ "io": { "scratch_offset": 128, "scratch_words": 64 } }"#,
    ConfigError::IoWindowOutOfRange { name: "scratch", offset: 128, size: 256 }
)]
#[case(
    r#"{ "io": { "syscon_offset": 4 } }"#,
    ConfigError::IoOverlap { first: "uart", second: "syscon" }
)]
fn rejected_documents(#[case] json: &str, #[case] expected: ConfigError) {
    match Config::from_json(json) {
        Err(SimError::Config(err)) => assert_eq!(err, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    assert!(matches!(
        Config::from_json(r#"{ "memory": { "ram_size": "big" } }"#),
        Err(SimError::Json(_))
    ));
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.json");
    fs::write(&path, r#"{ "general": { "max_cycles": 42 } }"#).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let config = Config::from_json(&text).unwrap();
    assert_eq!(config.general.max_cycles, Some(42));
}

#[rstest]
#[case(20)]
#[case(4)]
#[case(0x10)]
fn empty_scratch_is_not_mapped(#[case] offset: u32) {
    let json = format!(r#"{{ "io": {{ "scratch_offset": {offset}, "scratch_words": 0 }} }}"#);
    let config = Config::from_json(&json).unwrap();
    let names: Vec<_> = config.io.windows().iter().map(|w| w.0).collect();
    assert_eq!(names, ["uart", "syscon"]);
}
