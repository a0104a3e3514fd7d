use crate::cpu::z80::{Reg, Z80};

/// Operand slot 6 of the register field: the byte at (HL).
const HL_INDIRECT: u8 = 6;

impl Z80 {
    // --- Operand helpers ---

    /// Value of an 8-bit operand slot: a register or (HL).
    pub(crate) fn read_operand(&self, code: u8) -> u8 {
        match Reg::from_code(code) {
            Some(reg) => self.regs.get(reg),
            None => self.read8(self.regs.hl()),
        }
    }

    pub(crate) fn write_operand(&mut self, code: u8, value: u8) {
        match Reg::from_code(code) {
            Some(reg) => self.regs.set(reg, value),
            None => self.write8(self.regs.hl(), value),
        }
    }

    /// Logic group selected by opcode bits 5-3: 4=AND, 5=XOR, 6=OR, 7=CP.
    /// The arithmetic half (ADD/ADC/SUB/SBC) has no handler.
    fn perform_logic_op(&mut self, op: u8, val: u8) {
        let a = self.regs.get(Reg::A);
        match op {
            4 => self.regs.and(a, val, Reg::A),
            5 => self.regs.xor(a, val, Reg::A),
            6 => self.regs.or(a, val, Reg::A),
            7 => self.regs.compare(val),
            _ => unreachable!("arithmetic ALU op {op} is not wired"),
        }
    }

    /// AND/XOR/OR/CP r: 4 T, (HL): 7 T
    pub(crate) fn op_logic_r(&mut self, opcode: u8) {
        let src = opcode & 0x07;
        let val = self.read_operand(src);
        self.perform_logic_op((opcode >> 3) & 0x07, val);
        self.increment_clock(if src == HL_INDIRECT { 7 } else { 4 });
    }

    /// AND/XOR/OR/CP n: 7 T
    pub(crate) fn op_logic_n(&mut self, opcode: u8) {
        let val = self.read_byte();
        self.perform_logic_op((opcode >> 3) & 0x07, val);
        self.increment_clock(7);
    }

    /// INC rr / DEC rr: 6 T, no flags affected
    pub(crate) fn op_inc_dec_rr(&mut self, opcode: u8) {
        let code = (opcode >> 4) & 0x03;
        let val = self.regs.pair(code);
        let result = if opcode & 0x08 == 0 {
            val.wrapping_add(1)
        } else {
            val.wrapping_sub(1)
        };
        self.regs.set_pair(code, result);
        self.increment_clock(6);
    }
}
