use crate::cpu::z80::{Flag, Reg, Z80};

impl Z80 {
    /// Evaluate a condition code (3 bits from opcode bits 5-3).
    /// 0=NZ, 1=Z, 2=NC, 3=C, 4=PO, 5=PE, 6=P, 7=M
    pub(crate) fn eval_condition(&self, cc: u8) -> bool {
        let f = self.regs.f;
        match cc & 0x07 {
            0 => (f & Flag::Z as u8) == 0,  // NZ
            1 => (f & Flag::Z as u8) != 0,  // Z
            2 => (f & Flag::C as u8) == 0,  // NC
            3 => (f & Flag::C as u8) != 0,  // C
            4 => (f & Flag::PV as u8) == 0, // PO (parity odd)
            5 => (f & Flag::PV as u8) != 0, // PE (parity even)
            6 => (f & Flag::S as u8) == 0,  // P (positive)
            _ => (f & Flag::S as u8) != 0,  // M (minus)
        }
    }

    fn jump_relative(&mut self, offset: u8) {
        self.regs.pc = self.regs.pc.wrapping_add(offset as i8 as u16);
    }

    /// JP nn: 10 T
    pub(crate) fn op_jp_nn(&mut self, _opcode: u8) {
        self.regs.pc = self.read_word();
        self.increment_clock(10);
    }

    /// JR e: 12 T. The offset is relative to the address after the operand.
    pub(crate) fn op_jr_e(&mut self, _opcode: u8) {
        let offset = self.read_byte();
        self.jump_relative(offset);
        self.increment_clock(12);
    }

    /// JR cc,e: 12 T taken, 7 T not taken. Only NZ/Z/NC/C exist (cc 0-3).
    pub(crate) fn op_jr_cc_e(&mut self, opcode: u8) {
        let cc = (opcode >> 3) & 0x03;
        let offset = self.read_byte();
        if self.eval_condition(cc) {
            self.jump_relative(offset);
            self.increment_clock(12);
        } else {
            self.increment_clock(7);
        }
    }

    /// DJNZ e: 13 T taken, 8 T when B reaches zero
    pub(crate) fn op_djnz(&mut self, _opcode: u8) {
        let offset = self.read_byte();
        let b = self.regs.get(Reg::B).wrapping_sub(1);
        self.regs.set(Reg::B, b);
        if b != 0 {
            self.jump_relative(offset);
            self.increment_clock(13);
        } else {
            self.increment_clock(8);
        }
    }
}
