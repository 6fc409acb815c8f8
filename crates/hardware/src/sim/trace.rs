//! Request traces.
//!
//! A trace is a JSON array of data-port requests, one per cycle. Numbers may
//! be JSON integers or strings in hex (`"0x1000_0000"`), binary (`"0b1100"`)
//! or decimal.
//!
//! ```json
//! [
//!   { "addr": "0x10000000", "data": "0xdeadbeef", "write": true },
//!   { "addr": "0x10000000", "mask": "0b0011", "signed": true, "idle": 3 },
//!   { "addr": "0x10000003", "width": "byte" }
//! ]
//! ```
//!
//! A `width` field derives the mask from the address the way a load/store
//! unit would, and takes precedence over `mask`.

use serde::{Deserialize, Deserializer};

use crate::common::data::{AccessWidth, ByteEnable};
use crate::common::error::SimError;
use crate::core::pipeline::signals::Request;

/// One trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceEntry {
    /// Byte address.
    #[serde(deserialize_with = "de_u32")]
    pub addr: u32,
    /// Store value.
    #[serde(default, deserialize_with = "de_u32")]
    pub data: u32,
    /// Byte-enable mask; only the low four bits are kept.
    #[serde(default = "full_mask", deserialize_with = "de_mask")]
    pub mask: ByteEnable,
    /// Access width; overrides `mask` when present.
    #[serde(default)]
    pub width: Option<AccessWidth>,
    /// Store when true.
    #[serde(default)]
    pub write: bool,
    /// Sign-extend sub-word loads.
    #[serde(default)]
    pub signed: bool,
    /// Fetch address; the previous one is held when absent.
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub pc: Option<u32>,
    /// Idle cycles to insert before this request.
    #[serde(default)]
    pub idle: u32,
}

impl TraceEntry {
    /// Returns the byte-enable mask presented for this entry.
    pub const fn effective_mask(&self) -> ByteEnable {
        match self.width {
            Some(width) => ByteEnable::for_access(self.addr, width),
            None => self.mask,
        }
    }

    /// Returns the data-port request of this entry.
    pub const fn request(&self) -> Request {
        Request {
            address: self.addr,
            write_data: self.data,
            mask: self.effective_mask(),
            write_enable: self.write,
            signed: self.signed,
        }
    }
}

const fn full_mask() -> ByteEnable {
    ByteEnable::WORD
}

/// Accepts a JSON integer or a hex, binary or decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(u64),
    Str(String),
}

/// Parses `0x`/`0b`-prefixed or decimal text; `_` separators are ignored.
///
/// # Examples
///
/// ```
/// use mmu_core::sim::trace::parse_u32;
///
/// assert_eq!(parse_u32("0x8000_0010"), Some(0x8000_0010));
/// assert_eq!(parse_u32("0b1100"), Some(12));
/// assert_eq!(parse_u32("4096"), Some(4096));
/// assert_eq!(parse_u32("0x1_0000_0000"), None);
/// ```
pub fn parse_u32(text: &str) -> Option<u32> {
    let cleaned: String = text.trim().chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u32::from_str_radix(bin, 2).ok()
    } else {
        lower.parse().ok()
    }
}

fn numeric_to_u32<E: serde::de::Error>(value: Numeric) -> Result<u32, E> {
    match value {
        Numeric::Int(n) => {
            u32::try_from(n).map_err(|_| E::custom(format!("{n} does not fit in 32 bits")))
        }
        Numeric::Str(s) => {
            parse_u32(&s).ok_or_else(|| E::custom(format!("invalid number '{s}'")))
        }
    }
}

fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    numeric_to_u32(Numeric::deserialize(deserializer)?)
}

fn de_opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Option::<Numeric>::deserialize(deserializer)?
        .map(numeric_to_u32)
        .transpose()
}

fn de_mask<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ByteEnable, D::Error> {
    let bits = de_u32(deserializer)?;
    if bits > 0xF {
        return Err(serde::de::Error::custom(format!(
            "mask {bits:#x} is wider than four lanes"
        )));
    }
    Ok(ByteEnable::new(bits as u8))
}

/// Parses a JSON trace document.
///
/// # Errors
///
/// Returns [`SimError::Json`] if the document is not a valid trace.
pub fn parse_trace(json: &str) -> Result<Vec<TraceEntry>, SimError> {
    Ok(serde_json::from_str(json)?)
}
