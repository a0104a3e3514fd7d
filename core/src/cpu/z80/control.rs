use log::trace;

use crate::cpu::z80::{Reg, Z80};

impl Z80 {
    /// NOP: 4 T
    pub(crate) fn op_nop(&mut self, _opcode: u8) {
        self.increment_clock(4);
    }

    /// HALT: 4 T. PC stays past the HALT byte; only an interrupt resumes.
    pub(crate) fn op_halt(&mut self, _opcode: u8) {
        self.regs.halted = true;
        self.increment_clock(4);
    }

    /// DI: 4 T
    pub(crate) fn op_di(&mut self, _opcode: u8) {
        self.regs.iff1 = false;
        self.regs.iff2 = false;
        self.regs.int_lock = true;
        self.increment_clock(4);
    }

    /// EI: 4 T. Interrupts are held off until after the next instruction.
    pub(crate) fn op_ei(&mut self, _opcode: u8) {
        self.regs.iff1 = true;
        self.regs.iff2 = true;
        self.regs.int_lock = true;
        self.increment_clock(4);
    }

    /// DD / FD prefix: 4 T. Records IX/IY selection for the next opcode.
    pub(crate) fn op_index_prefix(&mut self, opcode: u8) {
        trace!("index prefix {opcode:02X}");
        self.regs.modifier = opcode;
        self.regs.int_lock = true;
        self.increment_clock(4);
    }

    /// OUT (n),A: 11 T. A drives the upper half of the port address.
    pub(crate) fn op_out_n_a(&mut self, _opcode: u8) {
        let n = self.read_byte();
        let a = self.regs.get(Reg::A);
        self.port_out(u16::from_be_bytes([a, n]), a);
        self.increment_clock(11);
    }

    /// IN A,(n): 11 T, flags unaffected
    pub(crate) fn op_in_a_n(&mut self, _opcode: u8) {
        let n = self.read_byte();
        let a = self.regs.get(Reg::A);
        let value = self.port_in(u16::from_be_bytes([a, n]));
        self.regs.set(Reg::A, value);
        self.increment_clock(11);
    }
}
