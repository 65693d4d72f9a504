//! Utility Functions
//!
//! Helper functions for frame conversion and other operations.

use detection::PixelBuffer;
use egui::{Color32, ColorImage, Vec2};

/// Converts an RGBA pixel buffer to an EGUI ColorImage
pub fn pixel_buffer_to_color_image(buffer: &PixelBuffer) -> ColorImage {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let pixels: Vec<Color32> = buffer
        .pixels()
        .map(|rgba| Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3]))
        .collect();

    ColorImage {
        size: [width, height],
        pixels,
        source_size: Vec2::new(width as f32, height as f32),
    }
}
