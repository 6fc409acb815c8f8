use mmu_core::core::pipeline::{IoSignals, MemorySignals};
use mmu_core::soc::System;
use mmu_core::soc::traits::{InstructionPort, IoPort, MemoryPort};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything the mocks saw, shared with the test after the ports are boxed.
#[derive(Default)]
pub struct ProbeLog {
    pub fetches: Vec<u32>,
    pub memory: Vec<MemorySignals>,
    pub io: Vec<IoSignals>,
    pub io_enabled: Vec<bool>,
    pub io_strobes: Vec<bool>,
}

#[derive(Clone, Default)]
pub struct Probe(Arc<Mutex<ProbeLog>>);

impl Probe {
    pub fn memory(&self) -> Vec<MemorySignals> {
        self.0.lock().unwrap().memory.clone()
    }

    pub fn io(&self) -> Vec<IoSignals> {
        self.0.lock().unwrap().io.clone()
    }

    pub fn fetches(&self) -> Vec<u32> {
        self.0.lock().unwrap().fetches.clone()
    }

    pub fn io_strobes(&self) -> Vec<bool> {
        self.0.lock().unwrap().io_strobes.clone()
    }

    pub fn io_enabled(&self) -> Vec<bool> {
        self.0.lock().unwrap().io_enabled.clone()
    }

    pub fn last_memory(&self) -> MemorySignals {
        *self.0.lock().unwrap().memory.last().expect("memory port clocked")
    }

    pub fn last_io(&self) -> IoSignals {
        *self.0.lock().unwrap().io.last().expect("io port clocked")
    }
}

pub struct RecordingRom {
    words: Vec<u32>,
    read_data: u32,
    probe: Probe,
}

impl RecordingRom {
    pub fn new(words: Vec<u32>, probe: Probe) -> Self {
        Self {
            words,
            read_data: 0,
            probe,
        }
    }
}

impl InstructionPort for RecordingRom {
    fn clock(&mut self, offset: u32) {
        self.probe.0.lock().unwrap().fetches.push(offset);
        self.read_data = self.words.get((offset / 4) as usize).copied().unwrap_or(0);
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }
}

/// Sparse word store that applies lane writes like the real bank.
pub struct RecordingMemory {
    words: HashMap<u32, u32>,
    read_data: u32,
    probe: Probe,
}

impl RecordingMemory {
    pub fn new(probe: Probe) -> Self {
        Self {
            words: HashMap::new(),
            read_data: 0,
            probe,
        }
    }
}

impl MemoryPort for RecordingMemory {
    fn clock(&mut self, signals: &MemorySignals) {
        self.probe.0.lock().unwrap().memory.push(*signals);
        let key = signals.offset & !3;
        let old = self.words.get(&key).copied().unwrap_or(0);
        self.read_data = old;
        if signals.write_enable {
            let merged = signals.write_lanes.merge(old, signals.write_data);
            let _ = self.words.insert(key, merged);
        }
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }

    fn peek(&self, offset: u32) -> u32 {
        self.words.get(&(offset & !3)).copied().unwrap_or(0)
    }

    fn size(&self) -> usize {
        0x7000_0000
    }

    fn load(&mut self, offset: u32, data: &[u8]) {
        for (i, chunk) in data.chunks(4).enumerate() {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            let _ = self
                .words
                .insert((offset & !3) + 4 * i as u32, u32::from_le_bytes(word));
        }
    }
}

/// 64 word registers behind the I/O port, recording every edge.
pub struct RecordingIo {
    regs: [u32; 64],
    read_data: u32,
    enabled: bool,
    write_strobe: bool,
    probe: Probe,
}

impl RecordingIo {
    pub fn new(probe: Probe) -> Self {
        Self {
            regs: [0; 64],
            read_data: 0,
            enabled: false,
            write_strobe: false,
            probe,
        }
    }
}

impl IoPort for RecordingIo {
    fn clock(&mut self, signals: &IoSignals) {
        self.enabled = signals.enable;
        self.write_strobe = signals.enable && signals.write_enable;
        let index = (signals.offset / 4) as usize;
        self.read_data = if signals.enable { self.regs[index] } else { 0 };
        if self.write_strobe {
            self.regs[index] = signals.write_lanes.merge(self.regs[index], signals.write_data);
        }
        let mut log = self.probe.0.lock().unwrap();
        log.io.push(*signals);
        log.io_enabled.push(self.enabled);
        log.io_strobes.push(self.write_strobe);
    }

    fn read_data(&self) -> u32 {
        self.read_data
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn write_strobe(&self) -> bool {
        self.write_strobe
    }
}

/// System wired to recording ports; the ROM holds `rom`.
pub fn mock_system(rom: Vec<u32>) -> (System, Probe) {
    let probe = Probe::default();
    let system = System::with_ports(
        Box::new(RecordingRom::new(rom, probe.clone())),
        Box::new(RecordingMemory::new(probe.clone())),
        Box::new(RecordingIo::new(probe.clone())),
    );
    (system, probe)
}
