//! Z80 disassembler.
//!
//! Decoding runs in three stages: prefix scan (DD/FD, then ED/CB), table
//! lookup in the table for that prefix combination, and operand rendering
//! where every operand symbol containing the placeholder is filled in by the
//! formatter for the definition's [`OperatorType`].

pub mod tables;

use std::fmt;

use log::error;
use thiserror::Error;

use crate::cpu::Z80;
use tables::{
    INDEX_PLACEHOLDER, InstructionDefinition, InstructionName, OPERATORS_CB, OPERATORS_DDFD,
    OPERATORS_DDFD_CB, OPERATORS_ED, OPERATORS_STANDARD, OperandName, OperatorType, PLACEHOLDER,
};

/// Side-effect-free byte access for the disassembler.
pub trait ByteSource {
    fn peek(&self, address: u16) -> u8;
}

/// Bytes past the end of the slice read as 0x00.
impl ByteSource for [u8] {
    fn peek(&self, address: u16) -> u8 {
        self.get(address as usize).copied().unwrap_or(0)
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    fn peek(&self, address: u16) -> u8 {
        self.as_slice().peek(address)
    }
}

impl ByteSource for Vec<u8> {
    fn peek(&self, address: u16) -> u8 {
        self.as_slice().peek(address)
    }
}

impl ByteSource for Z80 {
    fn peek(&self, address: u16) -> u8 {
        self.read8(address)
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u16,
    pub mnemonic: String,
    /// Bytes consumed, prefixes and operands included.
    pub length: u16,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}  {}", self.address, self.mnemonic)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexPrefix {
    None,
    Ix,
    Iy,
}

impl IndexPrefix {
    fn register(self) -> &'static str {
        match self {
            IndexPrefix::Iy => "IY",
            _ => "IX",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExtendedPrefix {
    None,
    Ed,
    Cb,
}

/// No definition exists for the decoded opcode under its prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot disassemble {opcode:#04X} at {address:#06X} (prefixes {index:?}/{extended:?})")]
pub struct DisasmError {
    pub address: u16,
    pub opcode: u8,
    pub index: IndexPrefix,
    pub extended: ExtendedPrefix,
    /// Bytes scanned before the lookup failed.
    pub length: u16,
}

impl DisasmError {
    /// Placeholder shown in place of an undecodable instruction.
    pub const MNEMONIC: &'static str = "???";

    pub fn mnemonic(&self) -> &'static str {
        Self::MNEMONIC
    }
}

/// Instruction table for a prefix combination. DD/FD in front of ED is
/// ignored by the CPU, so it shares the ED table.
pub fn table_for(index: IndexPrefix, extended: ExtendedPrefix) -> &'static [InstructionDefinition] {
    match (index, extended) {
        (IndexPrefix::None, ExtendedPrefix::None) => &OPERATORS_STANDARD,
        (IndexPrefix::None, ExtendedPrefix::Cb) => &OPERATORS_CB,
        (_, ExtendedPrefix::Ed) => &OPERATORS_ED,
        (_, ExtendedPrefix::None) => &OPERATORS_DDFD,
        (_, ExtendedPrefix::Cb) => &OPERATORS_DDFD_CB,
    }
}

/// Decode the instruction at `address`.
///
/// Failures are logged at error level; callers show [`DisasmError::MNEMONIC`]
/// and carry on.
pub fn decode_instruction<S: ByteSource + ?Sized>(
    source: &S,
    address: u16,
) -> Result<Instruction, DisasmError> {
    Decoder::new(source, address).decode().inspect_err(|e| error!("{e}"))
}

struct Decoder<'a, S: ?Sized> {
    source: &'a S,
    start: u16,
    cursor: u16,
    index: IndexPrefix,
    extended: ExtendedPrefix,
    displacement: u8,
    opcode: u8,
}

impl<'a, S: ByteSource + ?Sized> Decoder<'a, S> {
    fn new(source: &'a S, address: u16) -> Self {
        Self {
            source,
            start: address,
            cursor: address,
            index: IndexPrefix::None,
            extended: ExtendedPrefix::None,
            displacement: 0,
            opcode: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        let byte = self.source.peek(self.cursor);
        self.cursor = self.cursor.wrapping_add(1);
        byte
    }

    fn next_word(&mut self) -> u16 {
        let low = self.next_byte();
        let high = self.next_byte();
        u16::from_le_bytes([low, high])
    }

    fn length(&self) -> u16 {
        self.cursor.wrapping_sub(self.start)
    }

    // --- Prefix scan ---

    fn scan_prefixes(&mut self) {
        let mut byte = self.next_byte();
        self.index = match byte {
            0xDD => IndexPrefix::Ix,
            0xFD => IndexPrefix::Iy,
            _ => IndexPrefix::None,
        };
        if self.index != IndexPrefix::None {
            byte = self.next_byte();
        }

        self.extended = match byte {
            0xED => ExtendedPrefix::Ed,
            0xCB => ExtendedPrefix::Cb,
            _ => ExtendedPrefix::None,
        };
        if self.extended != ExtendedPrefix::None {
            byte = self.next_byte();
        }

        // DD CB d op: the byte after CB is the displacement
        if self.index != IndexPrefix::None && self.extended == ExtendedPrefix::Cb {
            self.displacement = byte;
            byte = self.next_byte();
        }
        self.opcode = byte;
    }

    // --- Table lookup ---

    fn lookup(&self) -> Result<InstructionDefinition, DisasmError> {
        table_for(self.index, self.extended)
            .get(self.opcode as usize)
            .copied()
            .filter(|d| d.name != InstructionName::Illegal)
            .ok_or(DisasmError {
                address: self.start,
                opcode: self.opcode,
                index: self.index,
                extended: self.extended,
                length: self.length(),
            })
    }

    // --- Operand rendering ---

    fn decode(mut self) -> Result<Instruction, DisasmError> {
        self.scan_prefixes();
        let definition = self.lookup()?;

        let mut mnemonic = definition.name.mnemonic().to_string();
        let mut separator = ' ';
        for operand in [definition.operand1, definition.operand2] {
            if operand == OperandName::None {
                continue;
            }
            mnemonic.push(separator);
            mnemonic.push_str(&self.render_operand(operand, definition.operator_type));
            separator = ',';
        }

        Ok(Instruction {
            address: self.start,
            mnemonic,
            length: self.length(),
        })
    }

    fn render_operand(&mut self, operand: OperandName, operator_type: OperatorType) -> String {
        let mut symbol = operand.symbol().to_string();
        if symbol.contains(INDEX_PLACEHOLDER) {
            symbol = symbol.replace(INDEX_PLACEHOLDER, self.index.register());
        }
        if symbol.contains(PLACEHOLDER) {
            let value = self.format_value(operator_type);
            symbol = symbol.replacen(PLACEHOLDER, &value, 1);
        }
        symbol
    }

    /// Consume and render the operand bytes for `operator_type`.
    fn format_value(&mut self, operator_type: OperatorType) -> String {
        match operator_type {
            OperatorType::None => String::new(),
            OperatorType::Direct8Bit | OperatorType::Indirect => {
                format!("{:02X}", self.next_byte())
            }
            OperatorType::Direct16Bit | OperatorType::Address => {
                format!("{:04X}", self.next_word())
            }
            OperatorType::PCRelativeAddress => {
                let offset = self.next_byte() as i8;
                format!("{:04X}", self.cursor.wrapping_add(offset as u16))
            }
            OperatorType::RestartAddress => format!("{:02X}", self.opcode & 0x38),
            OperatorType::Indirect8BitDisplacement => {
                let d = self.next_byte();
                signed_displacement(d)
            }
            OperatorType::PrefixedIndirect => signed_displacement(self.displacement),
        }
    }
}

fn signed_displacement(d: u8) -> String {
    let d = d as i8;
    if d < 0 {
        format!("-${:02X}", d.unsigned_abs())
    } else {
        format!("+${d:02X}")
    }
}
