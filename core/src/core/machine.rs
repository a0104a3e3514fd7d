use std::sync::atomic::AtomicBool;

use crate::core::frame::FrameBuffer;
use crate::cpu::CpuError;

/// Machine-agnostic interface between an emulated system and the frontend.
///
/// The frontend only renders frames and forwards step/quit requests; it does
/// not know about memory maps, ports or palettes.
pub trait Machine {
    /// Frame size as (width, height) in pixels, border included.
    fn display_size(&self) -> (u32, u32);

    /// Run one video frame's worth of T-states.
    ///
    /// `stop` is checked before every instruction; once it is set the frame
    /// ends early and `Ok` is returned.
    fn run_frame(&mut self, stop: &AtomicBool) -> Result<(), CpuError>;

    /// Execute exactly one instruction (single-step debugging).
    fn step(&mut self) -> Result<(), CpuError>;

    /// Draw the current video state into `frame`.
    fn render_frame(&self, frame: &mut FrameBuffer);

    /// Register dump plus the next instruction, for debug traces.
    fn debug_state(&self) -> String;

    /// Reset the machine to its power-on register state.
    fn reset(&mut self);
}
