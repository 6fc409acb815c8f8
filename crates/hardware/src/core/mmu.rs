//! Memory-management unit orchestration.
//!
//! The unit connects the combinational data path to the ports and the
//! pipeline register. Each call to [`Mmu::step`] is one rising clock edge:
//!
//! 1. The request address is decoded.
//! 2. Store data is packed onto its lanes.
//! 3. Each port is driven: the instruction port with the fetch offset, main
//!    memory and the I/O block only when they are the decoded destination.
//! 4. All ports are clocked.
//! 5. The pipeline register captures destination, mask and sign flag.
//!
//! Until the next edge, [`Mmu::response`] combines the latched snapshot with
//! the data the latched destination returned at this edge.

use tracing::{debug, trace, warn};

use crate::common::constants::{NOP, ROM_SIZE};
use crate::common::data::{ByteEnable, Destination, LoadValue};
use crate::core::pipeline::latches::{PipelineRegister, PipelineSnapshot, RegisterState};
use crate::core::pipeline::signals::{
    IDLE_ADDRESS, IoSignals, MemorySignals, PortSignals, Request, Response,
};
use crate::core::units::decoder::{AddressDecoder, Decoded};
use crate::core::units::packer::StoreDataPacker;
use crate::core::units::unpacker::LoadResultUnpacker;
use crate::soc::System;

/// The memory-management unit: decode, pack, drive, latch, unpack.
#[derive(Clone, Debug, Default)]
pub struct Mmu {
    register: PipelineRegister,
    signals: PortSignals,
    cycles: u64,
}

impl Mmu {
    /// Creates a unit in reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the port signals for one request without clocking anything.
    ///
    /// A store whose mask is outside the legal patterns drives no write.
    pub fn drive(fetch_pc: u32, request: &Request) -> (Decoded, PortSignals) {
        let decoded = AddressDecoder::decode(request.address);
        let mut signals = PortSignals {
            fetch_offset: fetch_pc % ROM_SIZE,
            ..PortSignals::default()
        };

        let (write_enable, write_lanes, write_data) = if request.write_enable {
            match StoreDataPacker::pack(request.write_data, request.mask) {
                Ok(data) => (true, request.mask, data),
                Err(_) => (false, ByteEnable::NONE, 0),
            }
        } else {
            (false, ByteEnable::NONE, 0)
        };

        match decoded {
            Decoded::MainMemory { offset } => {
                signals.memory = MemorySignals {
                    offset,
                    write_lanes,
                    write_data,
                    write_enable,
                };
            }
            Decoded::IoPort { offset } => {
                signals.io = IoSignals {
                    offset,
                    enable: true,
                    write_enable,
                    write_lanes,
                    write_data,
                };
            }
            Decoded::InstructionStore { .. } | Decoded::Unknown => {}
        }
        (decoded, signals)
    }

    /// Advances one clock edge with `request` on the data port and `fetch_pc`
    /// on the instruction port. Returns the decode result of `request`.
    pub fn step(&mut self, system: &mut System, fetch_pc: u32, request: &Request) -> Decoded {
        let (decoded, signals) = Self::drive(fetch_pc, request);
        let destination = decoded.destination();

        match destination {
            Destination::MainMemory | Destination::IoPort if !request.mask.is_legal() => {
                warn!(
                    address = format_args!("{:#010x}", request.address),
                    mask = %request.mask,
                    write = request.write_enable,
                    "illegal byte-enable mask; access result is unspecified"
                );
            }
            Destination::InstructionStore => {
                debug!(
                    address = format_args!("{:#010x}", request.address),
                    write = request.write_enable,
                    "data access to the instruction store ignored"
                );
            }
            Destination::Unknown if request.address != IDLE_ADDRESS => {
                debug!(
                    address = format_args!("{:#010x}", request.address),
                    "access outside every window"
                );
            }
            _ => {}
        }

        system.rom.clock(signals.fetch_offset);
        system.ram.clock(&signals.memory);
        system.io.clock(&signals.io);
        system.io.tick();

        self.register.latch(PipelineSnapshot {
            destination,
            mask: request.mask,
            signed: request.signed,
        });
        self.signals = signals;
        self.cycles += 1;

        trace!(
            cycle = self.cycles,
            pc = format_args!("{fetch_pc:#010x}"),
            address = format_args!("{:#010x}", request.address),
            %destination,
            mask = %request.mask,
            write = request.write_enable,
            "edge"
        );
        decoded
    }

    /// Returns the result of the request latched at the last edge.
    pub fn response(&self, system: &System) -> Response {
        let Some(snapshot) = self.register.snapshot() else {
            return Response::default();
        };
        let raw = match snapshot.destination {
            Destination::MainMemory => system.ram.read_data(),
            Destination::IoPort => system.io.read_data(),
            Destination::InstructionStore | Destination::Unknown => {
                return Response {
                    destination: Some(snapshot.destination),
                    data: LoadValue::Unspecified,
                };
            }
        };
        let data = LoadResultUnpacker::unpack(raw, snapshot.mask, snapshot.signed)
            .map_or(LoadValue::Unspecified, LoadValue::Defined);
        Response {
            destination: Some(snapshot.destination),
            data,
        }
    }

    /// Returns the instruction fetched at the last edge, or `NOP` while in reset.
    pub fn instruction(&self, system: &System) -> u32 {
        match self.register.state() {
            RegisterState::Uninitialized => NOP,
            RegisterState::Running(_) => system.rom.read_data(),
        }
    }

    /// Returns the signals driven at the last edge.
    pub const fn signals(&self) -> &PortSignals {
        &self.signals
    }

    /// Returns the pipeline register.
    pub const fn register(&self) -> &PipelineRegister {
        &self.register
    }

    /// Returns the number of edges since reset.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the unit to its post-reset state.
    pub fn reset(&mut self) {
        self.register.reset();
        self.signals = PortSignals::default();
        self.cycles = 0;
    }
}
