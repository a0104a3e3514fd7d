//! Property tests for the CPU's view of memory.
//!
//! - ROM bytes never change through the memory map
//! - RAM reads back whatever was last written
//! - 16-bit words are stored little-endian

use proptest::prelude::*;
use zeddy_core::cpu::Z80;
use zeddy_core::cpu::z80::{RAM_START, ROM_SIZE};

fn rom_address() -> impl Strategy<Value = u16> {
    0..ROM_SIZE as u16
}

fn ram_address() -> impl Strategy<Value = u16> {
    RAM_START..=u16::MAX
}

proptest! {
    #[test]
    fn prop_rom_is_write_protected(
        image in prop::collection::vec(any::<u8>(), ROM_SIZE),
        address in rom_address(),
        value in any::<u8>(),
    ) {
        let mut cpu = Z80::new();
        cpu.load_rom(&image).unwrap();
        cpu.write8(address, value);
        prop_assert_eq!(cpu.read8(address), image[address as usize]);
    }

    #[test]
    fn prop_ram_round_trip(address in ram_address(), value in any::<u8>()) {
        let mut cpu = Z80::new();
        cpu.write8(address, value);
        prop_assert_eq!(cpu.read8(address), value);
    }

    #[test]
    fn prop_word_is_little_endian(address in RAM_START..u16::MAX, value in any::<u16>()) {
        let mut cpu = Z80::new();
        cpu.write16(address, value);
        prop_assert_eq!(cpu.read8(address), value as u8);
        prop_assert_eq!(cpu.read8(address + 1), (value >> 8) as u8);
        prop_assert_eq!(cpu.read16(address), value);
    }

    #[test]
    fn prop_logic_flags_follow_table(a in any::<u8>(), b in any::<u8>()) {
        // LD A,a ; LD B,b ; XOR B
        let mut cpu = Z80::new();
        cpu.load_rom(&[0x3E, a, 0x06, b, 0xA8]).unwrap();
        for _ in 0..3 {
            cpu.execute_instruction().unwrap();
        }
        let result = a ^ b;
        prop_assert_eq!(cpu.regs.f, cpu.regs.flags_for(result));
        prop_assert_eq!(cpu.regs.get(zeddy_core::cpu::z80::Reg::A), result);
    }
}
