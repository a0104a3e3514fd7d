//! Unprefixed opcode dispatch table.

use std::fmt;

use crate::cpu::z80::Z80;

/// Executes one decoded opcode. The opcode byte is passed so one handler can
/// serve a whole encoding group (register fields in bits 5-3 / 2-0).
pub type Handler = fn(&mut Z80, u8);

#[derive(Clone, Copy)]
pub enum Opcode {
    Unimplemented,
    Implemented(Handler),
}

impl Opcode {
    pub fn is_implemented(&self) -> bool {
        matches!(self, Opcode::Implemented(_))
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Unimplemented => f.write_str("Unimplemented"),
            Opcode::Implemented(_) => f.write_str("Implemented"),
        }
    }
}

pub static OPCODES: [Opcode; 256] = build_table();

const fn build_table() -> [Opcode; 256] {
    use Opcode::Implemented as I;

    let mut t = [Opcode::Unimplemented; 256];

    t[0x00] = I(Z80::op_nop);
    t[0x08] = I(Z80::op_ex_af_af);
    t[0x10] = I(Z80::op_djnz);
    t[0x18] = I(Z80::op_jr_e);

    // LD rr,nn except BC
    t[0x11] = I(Z80::op_ld_rr_nn);
    t[0x21] = I(Z80::op_ld_rr_nn);
    t[0x31] = I(Z80::op_ld_rr_nn);

    let mut i = 0;
    while i < 4 {
        let base = (i as usize) << 4;
        t[base | 0x03] = I(Z80::op_inc_dec_rr);
        t[base | 0x0B] = I(Z80::op_inc_dec_rr);
        // JR NZ/Z/NC/C
        t[0x20 | (i as usize) << 3] = I(Z80::op_jr_cc_e);
        i += 1;
    }

    // LD r,n / LD (HL),n
    let mut r = 0;
    while r < 8 {
        t[(r << 3) | 0x06] = I(Z80::op_ld_r_n);
        r += 1;
    }

    // LD r,r'
    let mut op = 0x40;
    while op < 0x80 {
        t[op] = I(Z80::op_ld_r_r);
        op += 1;
    }
    t[0x76] = I(Z80::op_halt);

    // AND / XOR / OR / CP r
    let mut op = 0xA0;
    while op < 0xC0 {
        t[op] = I(Z80::op_logic_r);
        op += 1;
    }

    t[0xC3] = I(Z80::op_jp_nn);
    t[0xD3] = I(Z80::op_out_n_a);
    t[0xD9] = I(Z80::op_exx);
    t[0xDB] = I(Z80::op_in_a_n);
    t[0xDD] = I(Z80::op_index_prefix);
    t[0xE6] = I(Z80::op_logic_n);
    t[0xEB] = I(Z80::op_ex_de_hl);
    t[0xEE] = I(Z80::op_logic_n);
    t[0xF3] = I(Z80::op_di);
    t[0xF6] = I(Z80::op_logic_n);
    t[0xFB] = I(Z80::op_ei);
    t[0xFD] = I(Z80::op_index_prefix);
    t[0xFE] = I(Z80::op_logic_n);

    t
}
