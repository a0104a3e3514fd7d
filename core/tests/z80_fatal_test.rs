use log::Level;
use zeddy_core::FATAL_TARGET;
use zeddy_core::cpu::CpuError;
mod common;
use common::{capture_logs, cpu_with_rom};

#[test]
fn test_ld_bc_nn_is_fatal() {
    let logs = capture_logs();
    let mut cpu = cpu_with_rom(&[0x01, 0x34, 0x12]);

    let result = cpu.execute_instruction();
    assert_eq!(
        result,
        Err(CpuError::UnimplementedOpcode {
            opcode: 0x01,
            address: 0x0000
        })
    );
    assert!(result.unwrap_err().is_fatal());
    // Nothing after the opcode fetch happened
    assert_eq!(cpu.regs.bc(), 0);
    assert_eq!(cpu.regs.pc, 1);
    assert_eq!(cpu.clock(), 0);

    let lines = logs.matching("Cannot decode instruction 01 at 0000");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].target, FATAL_TARGET);
    assert_eq!(lines[0].level, Level::Error);
}

#[test]
fn test_extended_prefixes_are_unimplemented() {
    for (opcode, program) in [(0xED, [0xED, 0x56]), (0xCB, [0xCB, 0x47])] {
        let mut cpu = cpu_with_rom(&program);
        match cpu.execute_instruction() {
            Err(CpuError::UnimplementedOpcode { opcode: got, .. }) => assert_eq!(got, opcode),
            other => panic!("expected fatal error for {opcode:#04X}, got {other:?}"),
        }
    }
}

#[test]
fn test_fatal_error_is_sticky() {
    // JP 0x0010 ; ... ; 0010: ADD A,B
    let mut program = vec![0xC3, 0x10, 0x00];
    program.resize(0x10, 0x00);
    program.push(0x80);
    let mut cpu = cpu_with_rom(&program);
    cpu.execute_instruction().unwrap();
    let err = cpu.execute_instruction().unwrap_err();
    assert_eq!(
        err,
        CpuError::UnimplementedOpcode {
            opcode: 0x80,
            address: 0x0010
        }
    );
    assert_eq!(err.to_string(), "cannot decode instruction 0x80 at 0x0010");
}

#[test]
fn test_index_prefixed_instruction_fails() {
    let logs = capture_logs();
    // LD IX,0x1234 : DD 21 34 12
    let mut cpu = cpu_with_rom(&[0xDD, 0x21, 0x34, 0x12, 0xFD, 0x00]);

    // The prefix itself is accepted
    cpu.execute_instruction().unwrap();
    assert_eq!(cpu.regs.modifier, 0xDD);
    assert_eq!(cpu.clock(), 4);

    let err = cpu.execute_instruction().unwrap_err();
    assert_eq!(
        err,
        CpuError::PrefixedInstruction {
            prefix: 0xDD,
            opcode: 0x21,
            address: 0x0001
        }
    );
    assert_eq!(cpu.regs.modifier, 0);
    assert_eq!(cpu.regs.ix, 0);
    assert!(!logs.matching("Prefixed instruction DD 21").is_empty());
}

#[test]
fn test_fd_prefix_then_nop_fails() {
    let mut cpu = cpu_with_rom(&[0xFD, 0x00]);
    cpu.execute_instruction().unwrap();
    assert!(matches!(
        cpu.execute_instruction(),
        Err(CpuError::PrefixedInstruction { prefix: 0xFD, opcode: 0x00, .. })
    ));
}

#[test]
fn test_rom_too_large_is_not_fatal() {
    let err = CpuError::RomTooLarge {
        size: 0x8000,
        capacity: 0x4000,
    };
    assert!(!err.is_fatal());
}
