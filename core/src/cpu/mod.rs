use thiserror::Error;

pub mod state;
pub use state::Z80State;

pub mod z80;
pub use z80::Z80;

/// Failures surfaced by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The fetched opcode has no handler. Fatal: execution cannot continue.
    #[error("cannot decode instruction {opcode:#04X} at {address:#06X}")]
    UnimplementedOpcode { opcode: u8, address: u16 },

    /// A DD/FD prefix was consumed and the following opcode cannot be run.
    #[error("prefixed instruction {prefix:#04X} {opcode:#04X} at {address:#06X} is not supported")]
    PrefixedInstruction { prefix: u8, opcode: u8, address: u16 },

    /// ROM image larger than the ROM window. The caller may retry with
    /// another image.
    #[error("ROM image is {size} bytes but the ROM window holds {capacity}")]
    RomTooLarge { size: usize, capacity: usize },
}

impl CpuError {
    /// Whether execution must stop (as opposed to a rejected request).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RomTooLarge { .. })
    }
}
