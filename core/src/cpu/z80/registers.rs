use std::fmt;

use crate::cpu::z80::Flag;

/// 8-bit register slots. Numbering follows the 3-bit register field of the
/// opcode encoding; slot 6 is the `(HL)` operand and holds no register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reg {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    A = 7,
}

impl Reg {
    /// Decode an opcode register field. Returns `None` for 6, the `(HL)` slot.
    pub const fn from_code(code: u8) -> Option<Reg> {
        match code & 0x07 {
            0 => Some(Reg::B),
            1 => Some(Reg::C),
            2 => Some(Reg::D),
            3 => Some(Reg::E),
            4 => Some(Reg::H),
            5 => Some(Reg::L),
            7 => Some(Reg::A),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Reg::B => "B",
            Reg::C => "C",
            Reg::D => "D",
            Reg::E => "E",
            Reg::H => "H",
            Reg::L => "L",
            Reg::A => "A",
        }
    }
}

/// Full Z80 register file plus interrupt bookkeeping.
pub struct Registers {
    pub reg: [u8; 8],
    pub f: u8,
    // Alternate set for EXX / EX AF,AF'
    pub reg_alt: [u8; 8],
    pub f_alt: u8,

    pub ix: u16,
    pub iy: u16,
    pub pc: u16,
    pub sp: u16,
    pub i: u8,
    pub r: u8,

    pub iff1: bool,
    pub iff2: bool,
    pub im: u8,
    pub int_pending: bool,
    pub nmi_pending: bool,
    /// Blocks interrupt acceptance before the next instruction (set by
    /// EI, DI and prefix bytes).
    pub int_lock: bool,
    /// Active 0xDD/0xFD prefix, 0 when none.
    pub modifier: u8,
    pub halted: bool,

    flags_table: [u8; 256],
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self {
            reg: [0; 8],
            f: 0,
            reg_alt: [0; 8],
            f_alt: 0,
            ix: 0,
            iy: 0,
            pc: 0,
            sp: 0,
            i: 0,
            r: 0,
            iff1: false,
            iff2: false,
            im: 0,
            int_pending: false,
            nmi_pending: false,
            int_lock: false,
            modifier: 0,
            halted: false,
            flags_table: build_flags_table(),
        }
    }

    /// Zero every register and flag and rebuild the flags table.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn get(&self, reg: Reg) -> u8 {
        self.reg[reg as usize]
    }

    pub fn set(&mut self, reg: Reg, val: u8) {
        self.reg[reg as usize] = val;
    }

    // --- Register pairs: high byte in the first register, low in the second ---

    fn pair_of(&self, high: Reg, low: Reg) -> u16 {
        u16::from_be_bytes([self.get(high), self.get(low)])
    }

    fn set_pair_of(&mut self, high: Reg, low: Reg, val: u16) {
        let [h, l] = val.to_be_bytes();
        self.set(high, h);
        self.set(low, l);
    }

    pub fn af(&self) -> u16 { u16::from_be_bytes([self.get(Reg::A), self.f]) }
    pub fn set_af(&mut self, val: u16) { let [a, f] = val.to_be_bytes(); self.set(Reg::A, a); self.f = f; }

    pub fn bc(&self) -> u16 { self.pair_of(Reg::B, Reg::C) }
    pub fn set_bc(&mut self, val: u16) { self.set_pair_of(Reg::B, Reg::C, val); }

    pub fn de(&self) -> u16 { self.pair_of(Reg::D, Reg::E) }
    pub fn set_de(&mut self, val: u16) { self.set_pair_of(Reg::D, Reg::E, val); }

    pub fn hl(&self) -> u16 { self.pair_of(Reg::H, Reg::L) }
    pub fn set_hl(&mut self, val: u16) { self.set_pair_of(Reg::H, Reg::L, val); }

    /// 16-bit pair by opcode field (0=BC, 1=DE, 2=HL, 3=SP).
    pub fn pair(&self, code: u8) -> u16 {
        match code & 0x03 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    pub fn set_pair(&mut self, code: u8, val: u16) {
        match code & 0x03 {
            0 => self.set_bc(val),
            1 => self.set_de(val),
            2 => self.set_hl(val),
            _ => self.sp = val,
        }
    }

    /// Advance the 7-bit refresh counter; bit 7 is preserved.
    pub fn refresh(&mut self) {
        self.r = (self.r & 0x80) | (self.r.wrapping_add(1) & 0x7F);
    }

    // --- Flags ---

    pub fn flag(&self, flag: Flag) -> bool {
        self.f & flag as u8 != 0
    }

    /// S, Z, P/V and undocumented X/Y for a logic result, from the table.
    pub fn flags_for(&self, result: u8) -> u8 {
        self.flags_table[result as usize]
    }

    /// `dest = op1 ^ op2`. Carry and half-carry clear, S/Z/PV from the result.
    pub fn xor(&mut self, op1: u8, op2: u8, dest: Reg) {
        let result = op1 ^ op2;
        self.set(dest, result);
        self.f = self.flags_for(result);
    }

    /// `dest = op1 & op2`. Like XOR but AND always sets H.
    pub fn and(&mut self, op1: u8, op2: u8, dest: Reg) {
        let result = op1 & op2;
        self.set(dest, result);
        self.f = self.flags_for(result) | Flag::H as u8;
    }

    pub fn or(&mut self, op1: u8, op2: u8, dest: Reg) {
        let result = op1 | op2;
        self.set(dest, result);
        self.f = self.flags_for(result);
    }

    /// CP: flags of `A - value` without storing the difference.
    pub fn compare(&mut self, value: u8) {
        let a = self.get(Reg::A);
        let result_u16 = (a as u16).wrapping_sub(value as u16);
        let result = result_u16 as u8;

        let mut f = Flag::N as u8;
        if result == 0 { f |= Flag::Z as u8; }
        if (result & 0x80) != 0 { f |= Flag::S as u8; }
        if (a & 0xF) < (value & 0xF) { f |= Flag::H as u8; }
        if ((a ^ value) & (a ^ result) & 0x80) != 0 { f |= Flag::PV as u8; }
        if result_u16 > 0xFF { f |= Flag::C as u8; }

        // X/Y come from the operand for CP, not the result
        f |= value & (Flag::X as u8 | Flag::Y as u8);
        self.f = f;
    }

    // --- Exchanges ---

    /// EX AF,AF'
    pub fn exchange_af(&mut self) {
        std::mem::swap(&mut self.reg[Reg::A as usize], &mut self.reg_alt[Reg::A as usize]);
        std::mem::swap(&mut self.f, &mut self.f_alt);
    }

    /// EXX: swap BC, DE and HL with the alternate set.
    pub fn exchange_main(&mut self) {
        for slot in Reg::B as usize..=Reg::L as usize {
            std::mem::swap(&mut self.reg[slot], &mut self.reg_alt[slot]);
        }
    }

    /// EX DE,HL
    pub fn exchange_de_hl(&mut self) {
        let (de, hl) = (self.de(), self.hl());
        self.set_de(hl);
        self.set_hl(de);
    }

    /// Multi-line `NAME = value` listing of every register and flag.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

/// Precompute S, Y, X, P/V and Z for every possible result byte.
fn build_flags_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    for (value, entry) in table.iter_mut().enumerate() {
        let value = value as u8;
        // Fold the byte onto itself until bit 0 holds the XOR of all bits
        let mut parity = value;
        parity ^= parity >> 4;
        parity ^= parity >> 2;
        parity ^= parity >> 1;

        let mut f = value & (Flag::S as u8 | Flag::Y as u8 | Flag::X as u8);
        if parity & 0x01 == 0 {
            f |= Flag::PV as u8;
        }
        *entry = f;
    }
    table[0] |= Flag::Z as u8;
    table
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for reg in [Reg::A, Reg::B, Reg::C, Reg::D, Reg::E, Reg::H, Reg::L] {
            writeln!(f, "{} = 0x{:02X}", reg.name(), self.get(reg))?;
        }
        writeln!(
            f,
            "F = 0x{:02X} (S={} Z={} H={} PV={} N={} C={})",
            self.f,
            self.flag(Flag::S) as u8,
            self.flag(Flag::Z) as u8,
            self.flag(Flag::H) as u8,
            self.flag(Flag::PV) as u8,
            self.flag(Flag::N) as u8,
            self.flag(Flag::C) as u8,
        )?;
        for reg in [Reg::A, Reg::B, Reg::C, Reg::D, Reg::E, Reg::H, Reg::L] {
            writeln!(f, "{}' = 0x{:02X}", reg.name(), self.reg_alt[reg as usize])?;
        }
        writeln!(f, "F' = 0x{:02X}", self.f_alt)?;
        writeln!(f, "IX = 0x{:04X}", self.ix)?;
        writeln!(f, "IY = 0x{:04X}", self.iy)?;
        writeln!(f, "SP = 0x{:04X}", self.sp)?;
        writeln!(f, "PC = 0x{:04X}", self.pc)?;
        writeln!(f, "I = 0x{:02X}", self.i)?;
        writeln!(f, "R = 0x{:02X}", self.r)?;
        writeln!(f, "IFF1 = {}", self.iff1)?;
        writeln!(f, "IFF2 = {}", self.iff2)?;
        writeln!(f, "IM = {}", self.im)?;
        writeln!(f, "INT pending = {}", self.int_pending)?;
        writeln!(f, "NMI pending = {}", self.nmi_pending)?;
        writeln!(f, "INT lock = {}", self.int_lock)?;
        writeln!(f, "Modifier = 0x{:02X}", self.modifier)?;
        write!(f, "Halted = {}", self.halted)
    }
}
