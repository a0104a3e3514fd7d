//! Sinclair ZX Spectrum 48K.
//!
//! Hardware: Z80 @ 3.5 MHz, 16K ROM at 0x0000, 48K RAM at 0x4000, ULA output
//! latch on port 0xFE (border colour). The ULA raises the maskable interrupt
//! once per 69 888 T-state frame and holds it for 32 T-states.

pub mod palette;
pub mod screen;

use std::sync::atomic::{AtomicBool, Ordering};

use log::{Level, debug, info, log_enabled, trace};
use zeddy_core::core::frame::FrameBuffer;
use zeddy_core::core::machine::Machine;
use zeddy_core::cpu::{CpuError, Z80, Z80State};
use zeddy_core::disasm::{DisasmError, Instruction, decode_instruction};

use crate::rom_loader::RomImage;

/// T-states per video frame (312 lines x 224 T-states).
pub const FRAME_TSTATES: u64 = 69_888;

/// How long the ULA holds /INT low at the start of a frame.
pub const INT_LENGTH_TSTATES: u64 = 32;

pub struct Spectrum48 {
    cpu: Z80,
    /// Clock value when /INT was last asserted, while it is still held.
    int_asserted_at: Option<u64>,
}

impl Default for Spectrum48 {
    fn default() -> Self {
        Self::new()
    }
}

impl Spectrum48 {
    pub fn new() -> Self {
        Self {
            cpu: Z80::new(),
            int_asserted_at: None,
        }
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
        self.int_asserted_at = None;
    }

    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), CpuError> {
        self.cpu.load_rom(image)?;
        info!("ROM loaded ({} bytes)", image.len());
        Ok(())
    }

    pub fn load_rom_image(&mut self, image: &RomImage) -> Result<(), CpuError> {
        debug!("loading {} (CRC32 0x{:08X})", image.name(), image.crc32());
        self.load_rom(image.data())
    }

    /// Execute one instruction, tracing its disassembly first.
    pub fn process_instruction(&mut self) -> Result<(), CpuError> {
        if log_enabled!(Level::Trace) && !self.cpu.is_halted() {
            let pc = self.cpu.regs.pc;
            trace!("{:04X}  {}", pc, self.disassemble(pc));
        }
        self.cpu.execute_instruction()?;
        self.release_interrupt();
        Ok(())
    }

    /// Run until at least `budget` T-states have elapsed or `stop` is set.
    /// Returns the T-states actually executed.
    pub fn run_cycles(&mut self, budget: u64, stop: &AtomicBool) -> Result<u64, CpuError> {
        let start = self.cpu.clock();
        while self.cpu.clock() - start < budget {
            if stop.load(Ordering::Relaxed) {
                debug!("run stopped after {} T-states", self.cpu.clock() - start);
                break;
            }
            self.process_instruction()?;
        }
        Ok(self.cpu.clock() - start)
    }

    /// Assert /INT, as the ULA does at the top of each frame.
    pub fn request_interrupt(&mut self) {
        self.cpu.request_interrupt();
        self.int_asserted_at = Some(self.cpu.clock());
    }

    fn release_interrupt(&mut self) {
        if let Some(at) = self.int_asserted_at
            && self.cpu.clock() - at >= INT_LENGTH_TSTATES
        {
            self.cpu.clear_interrupt();
            self.int_asserted_at = None;
        }
    }

    // --- Debug views ---

    pub fn dump_registers(&self) -> String {
        self.cpu.dump_registers()
    }

    /// Mnemonic at `address`, or the undecodable placeholder.
    pub fn disassemble(&self, address: u16) -> String {
        decode_instruction(&self.cpu, address)
            .map(|instr| instr.mnemonic)
            .unwrap_or_else(|_| DisasmError::MNEMONIC.to_string())
    }

    /// The instruction PC points at.
    pub fn next_instruction(&self) -> Result<Instruction, DisasmError> {
        decode_instruction(&self.cpu, self.cpu.regs.pc)
    }

    pub fn cpu_clock(&self) -> u64 {
        self.cpu.clock()
    }

    pub fn cpu_clock_freq(&self) -> u32 {
        self.cpu.clock_freq()
    }

    /// Emulated time since reset.
    pub fn elapsed_seconds(&self) -> f64 {
        self.cpu.clock() as f64 / self.cpu.clock_freq() as f64
    }

    pub fn cpu(&self) -> &Z80 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Z80 {
        &mut self.cpu
    }

    pub fn snapshot(&self) -> Z80State {
        self.cpu.snapshot()
    }
}

impl Machine for Spectrum48 {
    fn display_size(&self) -> (u32, u32) {
        (screen::FRAME_WIDTH, screen::FRAME_HEIGHT)
    }

    fn run_frame(&mut self, stop: &AtomicBool) -> Result<(), CpuError> {
        self.request_interrupt();
        self.run_cycles(FRAME_TSTATES, stop)?;
        Ok(())
    }

    fn step(&mut self) -> Result<(), CpuError> {
        self.process_instruction()
    }

    fn render_frame(&self, frame: &mut FrameBuffer) {
        screen::render(&self.cpu, frame);
    }

    fn debug_state(&self) -> String {
        let pc = self.cpu.regs.pc;
        format!(
            "{:04X}  {}\n{}",
            pc,
            self.disassemble(pc),
            self.dump_registers()
        )
    }

    fn reset(&mut self) {
        Spectrum48::reset(self);
    }
}
