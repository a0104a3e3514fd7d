/// One packed pixel: red, green, blue.
pub type Rgb = [u8; 3];

/// Pending RGB24 frame that a machine draws into and the frontend presents.
///
/// Pixels are stored left-to-right, top-to-bottom, 3 bytes per pixel.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    border: Rgb,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            border: [0, 0, 0],
            pixels: vec![0; (width * height * 3) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn border(&self) -> Rgb {
        self.border
    }

    /// Set the border colour and flood the whole frame with it. The display
    /// area is drawn over the flood with [`write_pixel`](Self::write_pixel).
    pub fn set_border(&mut self, rgb: Rgb) {
        self.border = rgb;
        for pixel in self.pixels.chunks_exact_mut(3) {
            pixel.copy_from_slice(&rgb);
        }
    }

    /// Write one pixel. Coordinates outside the frame are ignored.
    pub fn write_pixel(&mut self, x: u32, y: u32, rgb: Rgb) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index..index + 3].copy_from_slice(&rgb);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let index = self.index(x, y)?;
        Some([
            self.pixels[index],
            self.pixels[index + 1],
            self.pixels[index + 2],
        ])
    }

    /// Raw RGB24 bytes, `width * height * 3` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| ((y * self.width + x) * 3) as usize)
    }
}
