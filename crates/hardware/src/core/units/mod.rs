//! Combinational units of the memory data path.
//!
//! Each unit is a pure function of its inputs and completes within the cycle.
//! The only state in the data path lives in the pipeline register.

/// Address decoder (window selection and relative offset).
pub mod decoder;

/// Store data packer (lane placement of write data).
pub mod packer;

/// Load result unpacker (lane extraction and sign/zero extension).
pub mod unpacker;

pub use decoder::{AddressDecoder, Decoded};
pub use packer::StoreDataPacker;
pub use unpacker::LoadResultUnpacker;
