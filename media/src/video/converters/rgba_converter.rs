//! BGR <-> RGBA conversion
//!
//! OpenCV hands out BGR (3 channel) matrices; the detection core works on
//! tightly packed RGBA.

use crate::error::{MediaError, Result};
use detection::PixelBuffer;
use opencv::core::Mat;
use opencv::imgproc::{COLOR_BGR2RGBA, COLOR_GRAY2RGBA, COLOR_RGBA2BGR, cvt_color_def};
use opencv::prelude::*;

/// Converts a BGR (or grayscale) matrix into an RGBA buffer.
///
/// An empty matrix gives an empty buffer.
pub fn mat_to_pixel_buffer(mat: &Mat) -> Result<PixelBuffer> {
    if mat.empty() {
        return Ok(PixelBuffer::empty());
    }

    let code = match mat.channels() {
        1 => COLOR_GRAY2RGBA,
        3 => COLOR_BGR2RGBA,
        n => {
            return Err(MediaError::Codec(format!(
                "Unsupported channel count: {}",
                n
            )));
        }
    };

    let mut rgba = Mat::default();
    cvt_color_def(mat, &mut rgba, code)?;

    let data = rgba
        .data_bytes()
        .map_err(|e| MediaError::Codec(format!("Failed to get frame data: {}", e)))?;

    PixelBuffer::new(rgba.cols() as u32, rgba.rows() as u32, data.to_vec())
        .map_err(|e| MediaError::Codec(e.to_string()))
}

/// Converts an RGBA buffer into a BGR matrix.
pub fn pixel_buffer_to_mat(buffer: &PixelBuffer) -> Result<Mat> {
    if buffer.is_empty() {
        return Err(MediaError::Codec("Cannot convert an empty frame".to_string()));
    }

    let flat = Mat::from_slice(buffer.data())
        .map_err(|e| MediaError::Codec(format!("Error creating Mat from RGBA data: {}", e)))?;
    let rgba = flat
        .reshape(4, buffer.height() as i32)
        .map_err(|e| MediaError::Codec(format!("Error reshaping Mat: {}", e)))?
        .try_clone()?;

    let mut bgr = Mat::default();
    cvt_color_def(&rgba, &mut bgr, COLOR_RGBA2BGR)?;
    Ok(bgr)
}
