//! Display file and border rendering.
//!
//! The 256x192 bitmap at 0x4000 is drawn inside a 32-pixel border. Pixel
//! rows are stored interleaved (thirds, then character rows, then scanlines);
//! the 32x24 attribute grid at 0x5800 supplies ink, paper and BRIGHT for each
//! 8x8 cell. FLASH is not animated.

use zeddy_core::core::frame::FrameBuffer;
use zeddy_core::cpu::Z80;

use super::palette;

pub const SCREEN_WIDTH: u32 = 256;
pub const SCREEN_HEIGHT: u32 = 192;
pub const BORDER: u32 = 32;

pub const FRAME_WIDTH: u32 = SCREEN_WIDTH + 2 * BORDER;
pub const FRAME_HEIGHT: u32 = SCREEN_HEIGHT + 2 * BORDER;

const BITMAP_BASE: u16 = 0x4000;
const ATTR_BASE: u16 = 0x5800;

/// Bitmap address: 010Y7 Y6Y2 Y1Y0 Y5Y4Y3 X4X3X2X1X0
pub fn bitmap_addr(y: u8, column: u8) -> u16 {
    let y = u16::from(y);
    BITMAP_BASE
        | ((y >> 6) & 0x03) << 11
        | (y & 0x07) << 8
        | ((y >> 3) & 0x07) << 5
        | u16::from(column & 0x1F)
}

/// Attribute address: 0101 10Y7 Y6Y5 Y4Y3 X4X3X2X1X0
pub fn attr_addr(y: u8, column: u8) -> u16 {
    ATTR_BASE | (u16::from(y / 8) << 5) | u16::from(column & 0x1F)
}

/// Draw border and display file into `frame`, which must be
/// [`FRAME_WIDTH`] x [`FRAME_HEIGHT`].
pub fn render(cpu: &Z80, frame: &mut FrameBuffer) {
    frame.set_border(palette::colour(cpu.border().colour(), false));

    for y in 0..SCREEN_HEIGHT as u8 {
        for column in 0..32u8 {
            let bitmap = cpu.read8(bitmap_addr(y, column));
            let attr = cpu.read8(attr_addr(y, column));

            // FBPPPIII
            let bright = attr & 0x40 != 0;
            let ink = palette::colour(attr & 0x07, bright);
            let paper = palette::colour((attr >> 3) & 0x07, bright);

            for bit in 0..8u8 {
                let colour = if bitmap & (0x80 >> bit) != 0 { ink } else { paper };
                let x = BORDER + u32::from(column) * 8 + u32::from(bit);
                frame.write_pixel(x, BORDER + u32::from(y), colour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_rows_are_interleaved() {
        assert_eq!(bitmap_addr(0, 0), 0x4000);
        assert_eq!(bitmap_addr(1, 0), 0x4100);
        assert_eq!(bitmap_addr(8, 0), 0x4020);
        assert_eq!(bitmap_addr(64, 0), 0x4800);
        assert_eq!(bitmap_addr(191, 31), 0x57FF);
    }

    #[test]
    fn attributes_are_linear_per_cell() {
        assert_eq!(attr_addr(0, 0), 0x5800);
        assert_eq!(attr_addr(7, 1), 0x5801);
        assert_eq!(attr_addr(8, 0), 0x5820);
        assert_eq!(attr_addr(191, 31), 0x5AFF);
    }
}
