use mmu_core::common::{ByteEnable, LoadValue};
use mmu_core::config::Config;
use mmu_core::core::pipeline::Request;
use mmu_core::sim::loader::ProgramImage;
use mmu_core::sim::{CycleRecord, Simulator};
use tracing_subscriber::EnvFilter;

/// Main-memory backing used by the harness (64 KiB).
pub const TEST_RAM_SIZE: usize = 64 * 1024;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_image(&ProgramImage::default())
    }

    pub fn with_image(image: &ProgramImage) -> Self {
        let mut config = Config::default();
        config.memory.ram_size = TEST_RAM_SIZE;
        Self::with_config(&config, image)
    }

    pub fn with_config(config: &Config, image: &ProgramImage) -> Self {
        init_logging();
        let sim = Simulator::new(config, image).expect("test system should build");
        Self { sim }
    }

    /// Instruction-store image from a list of words.
    pub fn with_rom(words: &[u32]) -> Self {
        let bytes = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        Self::with_image(&ProgramImage::flat(bytes).expect("rom image fits"))
    }

    pub fn write(&mut self, addr: u32, value: u32, mask: ByteEnable) -> CycleRecord {
        let pc = self.sim.pc();
        self.sim.step(pc, &Request::write(addr, value, mask))
    }

    pub fn write_word(&mut self, addr: u32, value: u32) -> CycleRecord {
        self.write(addr, value, ByteEnable::WORD)
    }

    pub fn read(&mut self, addr: u32, mask: ByteEnable, signed: bool) -> LoadValue {
        self.sim.load(&Request::read(addr, mask, signed))
    }

    pub fn read_word(&mut self, addr: u32) -> LoadValue {
        self.read(addr, ByteEnable::WORD, false)
    }

    pub fn idle(&mut self, cycles: usize) {
        for _ in 0..cycles {
            let _ = self.sim.idle();
        }
    }

    /// Word at a main-memory window offset, read without clocking.
    pub fn peek_ram(&self, offset: u32) -> u32 {
        self.sim.system.ram.peek(offset)
    }
}
