//! Conversions between OpenCV matrices and RGBA pixel buffers.

mod rgba_converter;

pub use rgba_converter::{mat_to_pixel_buffer, pixel_buffer_to_mat};
