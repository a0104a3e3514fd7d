mod alu;
mod branch;
mod control;
mod load_store;
pub mod opcodes;
pub mod registers;

use log::{error, trace};

use crate::FATAL_TARGET;
use crate::cpu::{CpuError, state::Z80State};
use crate::device::VideoBorder;
use crate::io::IoMap;
use crate::memory::{MemoryMap, MemorySpace, Ram, Rom};

use opcodes::{OPCODES, Opcode};
pub use registers::{Reg, Registers};

#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Flag {
    C = 0x01,  // Carry
    N = 0x02,  // Add/Subtract
    PV = 0x04, // Parity/Overflow
    X = 0x08,  // Unused (copy of bit 3)
    H = 0x10,  // Half Carry
    Y = 0x20,  // Unused (copy of bit 5)
    Z = 0x40,  // Zero
    S = 0x80,  // Sign
}

pub const CLOCK_FREQ_HZ: u32 = 3_500_000;

pub const ROM_START: u16 = 0x0000;
pub const ROM_SIZE: usize = 0x4000;
pub const RAM_START: u16 = 0x4000;
pub const RAM_SIZE: usize = 0xC000;

/// ULA output port: border colour, MIC and EAR.
pub const BORDER_PORT: u8 = 0xFE;

const NMI_VECTOR: u16 = 0x0066;
const IM1_VECTOR: u16 = 0x0038;

/// Zilog Z80 wired as in the Spectrum 48K: 16K ROM, 48K RAM and the border
/// latch on port 0xFE.
///
/// Execution is instruction-at-a-time. Each handler charges its full T-state
/// cost through [`Z80::increment_clock`] once it has finished.
pub struct Z80 {
    pub regs: Registers,

    memory: MemorySpace,
    memory_map: MemoryMap,
    io_map: IoMap,
    rom: Rom,
    border: VideoBorder,

    clock: u64,
    clock_freq: u32,
}

impl Default for Z80 {
    fn default() -> Self {
        Self::new()
    }
}

impl Z80 {
    pub fn new() -> Self {
        let rom = Rom::new(ROM_START, ROM_SIZE);
        let ram = Ram::new(RAM_START, RAM_SIZE);

        let mut memory_map = MemoryMap::new();
        memory_map.map(rom);
        memory_map.map(ram);

        let border = VideoBorder::new();
        let mut io_map = IoMap::new();
        io_map.map_port(border.clone(), BORDER_PORT);

        Self {
            regs: Registers::new(),
            memory: MemorySpace::new(0xFFFF),
            memory_map,
            io_map,
            rom,
            border,
            clock: 0,
            clock_freq: CLOCK_FREQ_HZ,
        }
    }

    /// Power-on register state. Memory contents are left alone.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.clock = 0;
    }

    /// Copy a ROM image into the ROM window, bypassing its write protection.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), CpuError> {
        if image.len() > self.rom.size() {
            return Err(CpuError::RomTooLarge {
                size: image.len(),
                capacity: self.rom.size(),
            });
        }
        self.memory.load(ROM_START as usize, image);
        Ok(())
    }

    // --- Bus access ---

    /// Memory read through the map; unmapped addresses float to 0x00.
    pub fn read8(&self, address: u16) -> u8 {
        self.memory_map.read8(&self.memory, address).unwrap_or(0x00)
    }

    pub fn write8(&mut self, address: u16, value: u8) {
        self.memory_map.write8(&mut self.memory, address, value);
    }

    /// Little-endian word; each byte goes through the map so a word that
    /// straddles the ROM/RAM boundary or wraps at 0xFFFF still works.
    pub fn read16(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.read8(address), self.read8(address.wrapping_add(1))])
    }

    pub fn write16(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write8(address, low);
        self.write8(address.wrapping_add(1), high);
    }

    /// IN: devices see the low byte of the port address. Undriven ports
    /// read 0xFF.
    pub fn port_in(&mut self, port: u16) -> u8 {
        self.io_map.read(port as u8).unwrap_or(0xFF)
    }

    pub fn port_out(&mut self, port: u16, value: u8) {
        self.io_map.write(port as u8, value);
    }

    /// M1 fetch: read at PC, advance PC, refresh R.
    pub fn read_opcode_byte(&mut self) -> u8 {
        let opcode = self.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        self.regs.refresh();
        opcode
    }

    /// Immediate operand byte at PC.
    pub fn read_byte(&mut self) -> u8 {
        let value = self.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Immediate little-endian operand word at PC.
    pub fn read_word(&mut self) -> u16 {
        let low = self.read_byte();
        let high = self.read_byte();
        u16::from_le_bytes([low, high])
    }

    pub fn push_word(&mut self, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        self.write16(self.regs.sp, value);
    }

    // --- Clock ---

    pub fn increment_clock(&mut self, tstates: u32) {
        self.clock += tstates as u64;
    }

    /// T-states since reset.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn clock_freq(&self) -> u32 {
        self.clock_freq
    }

    // --- Accessors ---

    pub fn is_halted(&self) -> bool {
        self.regs.halted
    }

    /// Handle on the port-0xFE latch shared with the IO map.
    pub fn border(&self) -> &VideoBorder {
        &self.border
    }

    pub fn memory(&self) -> &MemorySpace {
        &self.memory
    }

    // --- Interrupts ---

    /// Assert the maskable interrupt line. It stays asserted until
    /// [`Z80::clear_interrupt`] or until it is accepted.
    pub fn request_interrupt(&mut self) {
        self.regs.int_pending = true;
    }

    pub fn clear_interrupt(&mut self) {
        self.regs.int_pending = false;
    }

    pub fn request_nmi(&mut self) {
        self.regs.nmi_pending = true;
    }

    /// Accept a pending NMI or INT. Returns true if an interrupt response
    /// was run instead of the next instruction.
    fn service_interrupts(&mut self) -> bool {
        if self.regs.int_lock {
            return false;
        }

        if self.regs.nmi_pending {
            self.regs.nmi_pending = false;
            self.regs.halted = false;
            self.regs.iff1 = false;
            self.regs.refresh();
            self.push_word(self.regs.pc);
            self.regs.pc = NMI_VECTOR;
            self.increment_clock(11);
            trace!("NMI accepted, PC <- {NMI_VECTOR:#06X}");
            return true;
        }

        if self.regs.int_pending && self.regs.iff1 {
            self.regs.int_pending = false;
            self.regs.halted = false;
            self.regs.iff1 = false;
            self.regs.iff2 = false;
            self.regs.refresh();
            self.push_word(self.regs.pc);
            match self.regs.im {
                2 => {
                    let vector = u16::from_be_bytes([self.regs.i, 0xFF]);
                    self.regs.pc = self.read16(vector);
                    self.increment_clock(19);
                }
                // IM 0 assumes RST 38h on the floating data bus
                _ => {
                    self.regs.pc = IM1_VECTOR;
                    self.increment_clock(13);
                }
            }
            trace!("INT accepted (IM {}), PC <- {:#06X}", self.regs.im, self.regs.pc);
            return true;
        }

        false
    }

    // --- Execution ---

    /// Run one instruction (or one interrupt response, or one halted cycle).
    pub fn execute_instruction(&mut self) -> Result<(), CpuError> {
        if self.service_interrupts() {
            return Ok(());
        }
        self.regs.int_lock = false;

        if self.regs.halted {
            self.regs.refresh();
            self.increment_clock(4);
            return Ok(());
        }

        let address = self.regs.pc;
        let opcode = self.read_opcode_byte();

        if self.regs.modifier != 0 {
            let prefix = std::mem::take(&mut self.regs.modifier);
            error!(
                "Prefixed instruction {prefix:02X} {opcode:02X} at {address:04X} is not supported"
            );
            return Err(CpuError::PrefixedInstruction {
                prefix,
                opcode,
                address,
            });
        }

        match OPCODES[opcode as usize] {
            Opcode::Implemented(handler) => {
                handler(self, opcode);
                Ok(())
            }
            Opcode::Unimplemented => {
                error!(
                    target: FATAL_TARGET,
                    "Cannot decode instruction {opcode:02X} at {address:04X}"
                );
                Err(CpuError::UnimplementedOpcode { opcode, address })
            }
        }
    }

    /// Copy of the register file for display.
    pub fn snapshot(&self) -> Z80State {
        let r = &self.regs;
        Z80State {
            a: r.get(Reg::A),
            f: r.f,
            b: r.get(Reg::B),
            c: r.get(Reg::C),
            d: r.get(Reg::D),
            e: r.get(Reg::E),
            h: r.get(Reg::H),
            l: r.get(Reg::L),
            a_prime: r.reg_alt[Reg::A as usize],
            f_prime: r.f_alt,
            b_prime: r.reg_alt[Reg::B as usize],
            c_prime: r.reg_alt[Reg::C as usize],
            d_prime: r.reg_alt[Reg::D as usize],
            e_prime: r.reg_alt[Reg::E as usize],
            h_prime: r.reg_alt[Reg::H as usize],
            l_prime: r.reg_alt[Reg::L as usize],
            ix: r.ix,
            iy: r.iy,
            sp: r.sp,
            pc: r.pc,
            i: r.i,
            r: r.r,
            iff1: r.iff1,
            iff2: r.iff2,
            im: r.im,
            halted: r.halted,
            clock: self.clock,
        }
    }

    pub fn dump_registers(&self) -> String {
        format!("{}\nT-states = {}", self.regs.dump(), self.clock)
    }
}
