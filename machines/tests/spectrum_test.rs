use std::sync::atomic::AtomicBool;

use zeddy_core::core::frame::FrameBuffer;
use zeddy_core::core::machine::Machine;
use zeddy_core::cpu::CpuError;
use zeddy_machines::rom_loader::RomImage;
use zeddy_machines::spectrum::{FRAME_TSTATES, Spectrum48, palette};

fn spectrum_with_rom(program: &[u8]) -> Spectrum48 {
    let mut sys = Spectrum48::new();
    sys.load_rom(program).unwrap();
    sys.reset();
    sys
}

/// LD SP,0x8000 ; EI ; HALT, with an interrupt handler at 0x0038 that jumps
/// back to the EI. Nothing is ever popped, so SP counts interrupts.
fn halt_loop_rom() -> Vec<u8> {
    let mut rom = vec![0x31, 0x00, 0x80, 0xFB, 0x76];
    rom.resize(0x38, 0x00);
    rom.extend_from_slice(&[0xC3, 0x03, 0x00]);
    rom
}

// =================================================================
// Machine Trait Tests
// =================================================================

#[test]
fn test_display_size() {
    let sys = Spectrum48::new();
    assert_eq!(sys.display_size(), (320, 256));
}

#[test]
fn test_run_frame_raises_one_interrupt() {
    let mut sys = spectrum_with_rom(&halt_loop_rom());
    let stop = AtomicBool::new(false);

    sys.run_frame(&stop).unwrap();
    assert!(sys.cpu_clock() >= FRAME_TSTATES);
    assert_eq!(sys.cpu().regs.sp, 0x7FFE);
    assert!(sys.cpu().is_halted());

    sys.run_frame(&stop).unwrap();
    assert_eq!(sys.cpu().regs.sp, 0x7FFC);
}

#[test]
fn test_interrupt_released_after_32_tstates() {
    // DI ; then NOPs: the request is never accepted and must drop on its own
    let mut sys = spectrum_with_rom(&[0xF3]);
    sys.request_interrupt();
    assert!(sys.cpu().regs.int_pending);
    let stop = AtomicBool::new(false);
    sys.run_cycles(40, &stop).unwrap();
    assert!(!sys.cpu().regs.int_pending);
}

#[test]
fn test_run_cycles_honours_stop_flag() {
    let mut sys = spectrum_with_rom(&[0x00]);
    let stop = AtomicBool::new(true);
    assert_eq!(sys.run_cycles(FRAME_TSTATES, &stop).unwrap(), 0);
    assert_eq!(sys.cpu_clock(), 0);
}

#[test]
fn test_run_cycles_stops_on_fatal_opcode() {
    // NOP ; LD BC,nn
    let mut sys = spectrum_with_rom(&[0x00, 0x01, 0x00, 0x00]);
    let stop = AtomicBool::new(false);
    let err = sys.run_cycles(FRAME_TSTATES, &stop).unwrap_err();
    assert_eq!(
        err,
        CpuError::UnimplementedOpcode {
            opcode: 0x01,
            address: 0x0001
        }
    );
    assert_eq!(sys.cpu_clock(), 4);
}

#[test]
fn test_step_executes_one_instruction() {
    let mut sys = spectrum_with_rom(&[0x06, 0x05, 0xAF]);
    sys.step().unwrap();
    sys.step().unwrap();
    let state = sys.snapshot();
    assert_eq!(state.b, 5);
    assert_eq!(state.a, 0);
    assert_eq!(state.pc, 3);
    assert_eq!(sys.cpu_clock(), 11);
}

// =================================================================
// Rendering
// =================================================================

#[test]
fn test_border_follows_port_fe() {
    // LD A,2 ; OUT (0xFE),A
    let mut sys = spectrum_with_rom(&[0x3E, 0x02, 0xD3, 0xFE]);
    sys.step().unwrap();
    sys.step().unwrap();

    let (w, h) = sys.display_size();
    let mut frame = FrameBuffer::new(w, h);
    sys.render_frame(&mut frame);
    assert_eq!(frame.pixel(0, 0), Some(palette::colour(2, false)));
    assert_eq!(frame.pixel(w - 1, h - 1), Some(palette::colour(2, false)));
    assert_eq!(frame.border(), [0xCD, 0x00, 0x00]);
}

#[test]
fn test_display_file_uses_attributes() {
    let mut sys = Spectrum48::new();
    // Top-left cell: leftmost pixel set, BRIGHT white ink on black paper
    sys.cpu_mut().write8(0x4000, 0x80);
    sys.cpu_mut().write8(0x5800, 0x47);
    // Second scanline lives 256 bytes further on
    sys.cpu_mut().write8(0x4100, 0x01);

    let (w, h) = sys.display_size();
    let mut frame = FrameBuffer::new(w, h);
    sys.render_frame(&mut frame);

    assert_eq!(frame.pixel(32, 32), Some([0xFF, 0xFF, 0xFF]));
    assert_eq!(frame.pixel(33, 32), Some([0x00, 0x00, 0x00]));
    assert_eq!(frame.pixel(39, 33), Some([0xFF, 0xFF, 0xFF]));
    assert_eq!(frame.pixel(32, 33), Some([0x00, 0x00, 0x00]));
}

#[test]
fn test_default_attributes_render_black_on_black() {
    let sys = Spectrum48::new();
    let mut frame = FrameBuffer::new(320, 256);
    sys.render_frame(&mut frame);
    assert!(frame.pixels().iter().all(|&b| b == 0));
}

// =================================================================
// ROM handling and debug views
// =================================================================

#[test]
fn test_load_rom_image() {
    let image = RomImage::from_bytes("tiny.rom", vec![0x3E, 0x7F]).unwrap();
    let mut sys = Spectrum48::new();
    sys.load_rom_image(&image).unwrap();
    assert_eq!(sys.disassemble(0), "LD A,$7F");
}

#[test]
fn test_oversized_rom_is_rejected() {
    let mut sys = Spectrum48::new();
    let err = sys.load_rom(&vec![0u8; 0x4001]).unwrap_err();
    assert!(!err.is_fatal());
}

#[test]
fn test_disassemble_placeholder() {
    let sys = spectrum_with_rom(&[0xED, 0xB0]);
    assert_eq!(sys.disassemble(0), "???");
    assert!(sys.next_instruction().is_err());
}

#[test]
fn test_debug_state_shows_next_instruction() {
    let mut sys = spectrum_with_rom(&[0x00, 0xC3, 0x00, 0x00]);
    sys.step().unwrap();
    let state = sys.debug_state();
    assert!(state.starts_with("0001  JP $0000"));
    assert!(state.contains("PC = 0x0001"));
    assert_eq!(sys.next_instruction().unwrap().length, 3);
}

#[test]
fn test_clock_and_reset() {
    let mut sys = spectrum_with_rom(&[0x00; 16]);
    for _ in 0..7 {
        sys.step().unwrap();
    }
    assert_eq!(sys.cpu_clock(), 28);
    assert_eq!(sys.cpu_clock_freq(), 3_500_000);
    assert!((sys.elapsed_seconds() - 28.0 / 3_500_000.0).abs() < 1e-12);

    sys.reset();
    assert_eq!(sys.cpu_clock(), 0);
    assert_eq!(sys.cpu().regs.pc, 0);
    // ROM contents survive the reset
    assert_eq!(sys.disassemble(0), "NOP");
}

#[test]
fn test_dump_registers() {
    let sys = Spectrum48::new();
    let dump = sys.dump_registers();
    assert!(dump.contains("PC = 0x0000"));
    assert!(dump.contains("T-states = 0"));
}
