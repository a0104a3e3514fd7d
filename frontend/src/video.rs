use anyhow::{Result, anyhow};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use zeddy_core::core::frame::FrameBuffer;

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

impl Video {
    /// Create an SDL window and renderer for the given native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Result<Self> {
        let window = sdl_video
            .window(title, native_width * scale, native_height * scale)
            .position_centered()
            .build()?;

        let canvas = window.into_canvas().accelerated().present_vsync().build()?;
        let texture_creator = canvas.texture_creator();

        Ok(Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
        })
    }

    /// Upload an RGB24 frame to a texture and present it.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, self.width, self.height)?;

        texture
            .update(None, frame.pixels(), (self.width * 3) as usize)
            .map_err(|e| anyhow!("texture update failed: {e}"))?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None).map_err(anyhow::Error::msg)?;
        self.canvas.present();
        Ok(())
    }
}
