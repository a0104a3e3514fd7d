//! Static instruction definitions, one table per prefix combination.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InstructionName {
    Nop,
    Ex,
    Exx,
    Djnz,
    Jr,
    Jp,
    Call,
    Ret,
    Rst,
    Ld,
    Push,
    Pop,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Inc,
    Dec,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Halt,
    Di,
    Ei,
    In,
    Out,
    /// Prefix bytes and holes; never rendered.
    Illegal,
}

impl InstructionName {
    pub const fn mnemonic(self) -> &'static str {
        use InstructionName::*;
        match self {
            Nop => "NOP",
            Ex => "EX",
            Exx => "EXX",
            Djnz => "DJNZ",
            Jr => "JR",
            Jp => "JP",
            Call => "CALL",
            Ret => "RET",
            Rst => "RST",
            Ld => "LD",
            Push => "PUSH",
            Pop => "POP",
            Add => "ADD",
            Adc => "ADC",
            Sub => "SUB",
            Sbc => "SBC",
            And => "AND",
            Xor => "XOR",
            Or => "OR",
            Cp => "CP",
            Inc => "INC",
            Dec => "DEC",
            Rlca => "RLCA",
            Rrca => "RRCA",
            Rla => "RLA",
            Rra => "RRA",
            Daa => "DAA",
            Cpl => "CPL",
            Scf => "SCF",
            Ccf => "CCF",
            Halt => "HALT",
            Di => "DI",
            Ei => "EI",
            In => "IN",
            Out => "OUT",
            Illegal => "???",
        }
    }
}

/// How the bytes following the opcode encode the operand value. Selects the
/// formatter for operands whose symbol carries the placeholder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperatorType {
    None,
    /// n: one immediate byte
    Direct8Bit,
    /// nn: little-endian immediate word
    Direct16Bit,
    /// nn used as a jump target or memory address
    Address,
    /// (n): 8-bit port number
    Indirect,
    /// e: signed offset from the address after the instruction
    PCRelativeAddress,
    /// RST target encoded in opcode bits 5-3
    RestartAddress,
    /// (IX+d) / (IY+d), displacement follows the opcode
    Indirect8BitDisplacement,
    /// DD CB d op / FD CB d op, displacement precedes the opcode
    PrefixedIndirect,
}

/// Marks where a formatted operand value is spliced into a symbol.
pub const PLACEHOLDER: char = '*';

/// Marks where IX or IY is spliced in under a DD/FD prefix.
pub const INDEX_PLACEHOLDER: &str = "XY";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandName {
    None,
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    Af,
    AfAlt,
    Bc,
    De,
    Hl,
    Sp,
    IndBc,
    IndDe,
    IndHl,
    IndSp,
    Imm8,
    Imm16,
    IndImm16,
    Port,
    Rel,
    Restart,
    IndIndexDisp,
    Nz,
    Z,
    Nc,
    Cy,
    Po,
    Pe,
    P,
    M,
}

impl OperandName {
    pub const fn symbol(self) -> &'static str {
        use OperandName::*;
        match self {
            None => "",
            A => "A",
            B => "B",
            C | Cy => "C",
            D => "D",
            E => "E",
            H => "H",
            L => "L",
            Af => "AF",
            AfAlt => "AF'",
            Bc => "BC",
            De => "DE",
            Hl => "HL",
            Sp => "SP",
            IndBc => "(BC)",
            IndDe => "(DE)",
            IndHl => "(HL)",
            IndSp => "(SP)",
            Imm8 | Imm16 | Rel | Restart => "$*",
            IndImm16 | Port => "($*)",
            IndIndexDisp => "(XY*)",
            Nz => "NZ",
            Z => "Z",
            Nc => "NC",
            Po => "PO",
            Pe => "PE",
            P => "P",
            M => "M",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InstructionDefinition {
    pub name: InstructionName,
    pub operator_type: OperatorType,
    pub operand1: OperandName,
    pub operand2: OperandName,
}

impl InstructionDefinition {
    const ILLEGAL: Self = def(InstructionName::Illegal, OperatorType::None, OperandName::None, OperandName::None);
}

const fn def(
    name: InstructionName,
    operator_type: OperatorType,
    operand1: OperandName,
    operand2: OperandName,
) -> InstructionDefinition {
    InstructionDefinition {
        name,
        operator_type,
        operand1,
        operand2,
    }
}

/// Unprefixed opcodes.
pub static OPERATORS_STANDARD: [InstructionDefinition; 256] = build_standard();

// Extended and index tables are not populated yet; lookups through them fail.
pub static OPERATORS_ED: [InstructionDefinition; 0] = [];
pub static OPERATORS_DDFD: [InstructionDefinition; 0] = [];
pub static OPERATORS_CB: [InstructionDefinition; 0] = [];
pub static OPERATORS_DDFD_CB: [InstructionDefinition; 0] = [];

const REG8: [OperandName; 8] = [
    OperandName::B,
    OperandName::C,
    OperandName::D,
    OperandName::E,
    OperandName::H,
    OperandName::L,
    OperandName::IndHl,
    OperandName::A,
];

const REG16_SP: [OperandName; 4] = [OperandName::Bc, OperandName::De, OperandName::Hl, OperandName::Sp];
const REG16_AF: [OperandName; 4] = [OperandName::Bc, OperandName::De, OperandName::Hl, OperandName::Af];

const CONDITIONS: [OperandName; 8] = [
    OperandName::Nz,
    OperandName::Z,
    OperandName::Nc,
    OperandName::Cy,
    OperandName::Po,
    OperandName::Pe,
    OperandName::P,
    OperandName::M,
];

const ALU: [InstructionName; 8] = [
    InstructionName::Add,
    InstructionName::Adc,
    InstructionName::Sub,
    InstructionName::Sbc,
    InstructionName::And,
    InstructionName::Xor,
    InstructionName::Or,
    InstructionName::Cp,
];

const ROTATE_AND_FLAGS: [InstructionName; 8] = [
    InstructionName::Rlca,
    InstructionName::Rrca,
    InstructionName::Rla,
    InstructionName::Rra,
    InstructionName::Daa,
    InstructionName::Cpl,
    InstructionName::Scf,
    InstructionName::Ccf,
];

/// ADD/ADC/SBC carry an explicit A operand, the rest do not.
const fn alu_def(op: usize, operator_type: OperatorType, operand: OperandName) -> InstructionDefinition {
    let name = ALU[op];
    match name {
        InstructionName::Add | InstructionName::Adc | InstructionName::Sbc => {
            def(name, operator_type, OperandName::A, operand)
        }
        _ => def(name, operator_type, operand, OperandName::None),
    }
}

/// Decode one unprefixed opcode from its x/y/z/p/q fields.
const fn standard(opcode: u8) -> InstructionDefinition {
    use InstructionName as N;
    use OperandName as O;
    use OperatorType as T;

    let x = opcode >> 6;
    let y = ((opcode >> 3) & 0x07) as usize;
    let z = (opcode & 0x07) as usize;
    let p = y >> 1;
    let q = y & 1;

    match (x, z) {
        (0, 0) => match y {
            0 => def(N::Nop, T::None, O::None, O::None),
            1 => def(N::Ex, T::None, O::Af, O::AfAlt),
            2 => def(N::Djnz, T::PCRelativeAddress, O::Rel, O::None),
            3 => def(N::Jr, T::PCRelativeAddress, O::Rel, O::None),
            _ => def(N::Jr, T::PCRelativeAddress, CONDITIONS[y - 4], O::Rel),
        },
        (0, 1) if q == 0 => def(N::Ld, T::Direct16Bit, REG16_SP[p], O::Imm16),
        (0, 1) => def(N::Add, T::None, O::Hl, REG16_SP[p]),
        (0, 2) => match (q, p) {
            (0, 0) => def(N::Ld, T::None, O::IndBc, O::A),
            (0, 1) => def(N::Ld, T::None, O::IndDe, O::A),
            (0, 2) => def(N::Ld, T::Address, O::IndImm16, O::Hl),
            (0, _) => def(N::Ld, T::Address, O::IndImm16, O::A),
            (_, 0) => def(N::Ld, T::None, O::A, O::IndBc),
            (_, 1) => def(N::Ld, T::None, O::A, O::IndDe),
            (_, 2) => def(N::Ld, T::Address, O::Hl, O::IndImm16),
            _ => def(N::Ld, T::Address, O::A, O::IndImm16),
        },
        (0, 3) if q == 0 => def(N::Inc, T::None, REG16_SP[p], O::None),
        (0, 3) => def(N::Dec, T::None, REG16_SP[p], O::None),
        (0, 4) => def(N::Inc, T::None, REG8[y], O::None),
        (0, 5) => def(N::Dec, T::None, REG8[y], O::None),
        (0, 6) => def(N::Ld, T::Direct8Bit, REG8[y], O::Imm8),
        (0, _) => def(ROTATE_AND_FLAGS[y], T::None, O::None, O::None),

        (1, 6) if y == 6 => def(N::Halt, T::None, O::None, O::None),
        (1, _) => def(N::Ld, T::None, REG8[y], REG8[z]),

        (2, _) => alu_def(y, T::None, REG8[z]),

        (3, 0) => def(N::Ret, T::None, CONDITIONS[y], O::None),
        (3, 1) if q == 0 => def(N::Pop, T::None, REG16_AF[p], O::None),
        (3, 1) => match p {
            0 => def(N::Ret, T::None, O::None, O::None),
            1 => def(N::Exx, T::None, O::None, O::None),
            2 => def(N::Jp, T::None, O::IndHl, O::None),
            _ => def(N::Ld, T::None, O::Sp, O::Hl),
        },
        (3, 2) => def(N::Jp, T::Address, CONDITIONS[y], O::Imm16),
        (3, 3) => match y {
            0 => def(N::Jp, T::Address, O::Imm16, O::None),
            2 => def(N::Out, T::Indirect, O::Port, O::A),
            3 => def(N::In, T::Indirect, O::A, O::Port),
            4 => def(N::Ex, T::None, O::IndSp, O::Hl),
            5 => def(N::Ex, T::None, O::De, O::Hl),
            6 => def(N::Di, T::None, O::None, O::None),
            7 => def(N::Ei, T::None, O::None, O::None),
            // CB prefix
            _ => InstructionDefinition::ILLEGAL,
        },
        (3, 4) => def(N::Call, T::Address, CONDITIONS[y], O::Imm16),
        (3, 5) if q == 0 => def(N::Push, T::None, REG16_AF[p], O::None),
        (3, 5) if p == 0 => def(N::Call, T::Address, O::Imm16, O::None),
        // DD, ED and FD prefixes
        (3, 5) => InstructionDefinition::ILLEGAL,
        (3, 6) => alu_def(y, T::Direct8Bit, O::Imm8),
        _ => def(N::Rst, T::RestartAddress, O::Restart, O::None),
    }
}

const fn build_standard() -> [InstructionDefinition; 256] {
    let mut table = [InstructionDefinition::ILLEGAL; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = standard(opcode as u8);
        opcode += 1;
    }
    table
}
