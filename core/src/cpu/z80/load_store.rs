use crate::cpu::z80::Z80;

impl Z80 {
    /// LD rr,nn: 10 T. 0x01 (LD BC,nn) has no table entry.
    pub(crate) fn op_ld_rr_nn(&mut self, opcode: u8) {
        let val = self.read_word();
        self.regs.set_pair((opcode >> 4) & 0x03, val);
        self.increment_clock(10);
    }

    /// LD r,n: 7 T, LD (HL),n: 10 T
    pub(crate) fn op_ld_r_n(&mut self, opcode: u8) {
        let dst = (opcode >> 3) & 0x07;
        let val = self.read_byte();
        self.write_operand(dst, val);
        self.increment_clock(if dst == 6 { 10 } else { 7 });
    }

    /// LD r,r': 4 T, 7 T when either side is (HL). 0x76 is HALT, not LD (HL),(HL).
    pub(crate) fn op_ld_r_r(&mut self, opcode: u8) {
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let val = self.read_operand(src);
        self.write_operand(dst, val);
        self.increment_clock(if dst == 6 || src == 6 { 7 } else { 4 });
    }

    /// EX AF,AF': 4 T
    pub(crate) fn op_ex_af_af(&mut self, _opcode: u8) {
        self.regs.exchange_af();
        self.increment_clock(4);
    }

    /// EXX: 4 T
    pub(crate) fn op_exx(&mut self, _opcode: u8) {
        self.regs.exchange_main();
        self.increment_clock(4);
    }

    /// EX DE,HL: 4 T
    pub(crate) fn op_ex_de_hl(&mut self, _opcode: u8) {
        self.regs.exchange_de_hl();
        self.increment_clock(4);
    }
}
