use crate::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Off-screen RGBA drawing surface with a fixed size.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        };
        canvas.clear();
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills with opaque black.
    pub fn clear(&mut self) {
        for px in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&BACKGROUND);
        }
    }

    /// Copies `image` with its top-left corner at the origin, clipping
    /// whatever does not fit.
    pub fn draw(&mut self, image: &PixelBuffer) {
        let cols = self.width.min(image.width()) as usize;
        let rows = self.height.min(image.height()) as usize;
        let row_bytes = cols * BYTES_PER_PIXEL;
        let dst_stride = self.width as usize * BYTES_PER_PIXEL;
        let src_stride = image.width() as usize * BYTES_PER_PIXEL;
        let src = image.data();

        for y in 0..rows {
            let dst = y * dst_stride;
            let from = y * src_stride;
            self.data[dst..dst + row_bytes].copy_from_slice(&src[from..from + row_bytes]);
        }
    }

    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::from_raw(self.width, self.height, self.data.clone())
    }
}
