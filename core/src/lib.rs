pub mod core;
pub mod cpu;
pub mod device;
pub mod disasm;
pub mod io;
pub mod memory;

/// Log target for unrecoverable conditions. Lines on this target are the
/// "Fatal" category: the caller is expected to stop executing afterwards.
pub const FATAL_TARGET: &str = "zeddy::fatal";

pub mod prelude {
    pub use crate::core::frame::{FrameBuffer, Rgb};
    pub use crate::core::machine::Machine;
    pub use crate::cpu::{CpuError, Z80};
    pub use crate::disasm::{ByteSource, DisasmError, Instruction, decode_instruction};
}
