//! ZX Spectrum 16-colour palette.
//!
//! 3-bit GRB colour plus a BRIGHT bit. Normal colours use 0xCD intensity,
//! bright ones 0xFF. Black is the same in both halves.

use zeddy_core::core::frame::Rgb;

/// Index layout: `bright << 3 | colour`.
pub const PALETTE: [Rgb; 16] = [
    // Normal
    [0x00, 0x00, 0x00], // 0: Black
    [0x00, 0x00, 0xCD], // 1: Blue
    [0xCD, 0x00, 0x00], // 2: Red
    [0xCD, 0x00, 0xCD], // 3: Magenta
    [0x00, 0xCD, 0x00], // 4: Green
    [0x00, 0xCD, 0xCD], // 5: Cyan
    [0xCD, 0xCD, 0x00], // 6: Yellow
    [0xCD, 0xCD, 0xCD], // 7: White
    // Bright
    [0x00, 0x00, 0x00], // 8: Black
    [0x00, 0x00, 0xFF], // 9: Bright Blue
    [0xFF, 0x00, 0x00], // 10: Bright Red
    [0xFF, 0x00, 0xFF], // 11: Bright Magenta
    [0x00, 0xFF, 0x00], // 12: Bright Green
    [0x00, 0xFF, 0xFF], // 13: Bright Cyan
    [0xFF, 0xFF, 0x00], // 14: Bright Yellow
    [0xFF, 0xFF, 0xFF], // 15: Bright White
];

/// Colour for a 3-bit colour index and BRIGHT flag.
pub fn colour(index: u8, bright: bool) -> Rgb {
    PALETTE[((bright as usize) << 3) | (index & 0x07) as usize]
}
