//! JPEG still images.

use crate::common::constants::still::{JPEG_EXTENSION, JPEG_QUALITY};
use crate::error::{MediaError, Result};
use crate::video::converters::{mat_to_pixel_buffer, pixel_buffer_to_mat};
use detection::{DetectionError, PixelBuffer, StillCodec};
use opencv::core::Vector;
use opencv::imgcodecs::{IMREAD_COLOR, IMWRITE_JPEG_QUALITY, imdecode, imencode};
use opencv::prelude::*;

/// Encodes captured frames as JPEG through OpenCV.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    quality: i32,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl JpegCodec {
    /// `quality` is clamped to OpenCV's `[0, 100]`.
    pub fn with_quality(quality: i32) -> Self {
        Self {
            quality: quality.clamp(0, 100),
        }
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    fn encode_jpeg(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let bgr = pixel_buffer_to_mat(buffer)?;
        let params = Vector::<i32>::from_slice(&[IMWRITE_JPEG_QUALITY, self.quality]);
        let mut out = Vector::<u8>::new();

        if !imencode(JPEG_EXTENSION, &bgr, &mut out, &params)? {
            return Err(MediaError::Codec("JPEG encoder rejected the frame".to_string()));
        }
        Ok(out.to_vec())
    }

    fn decode_jpeg(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let input = Vector::<u8>::from_slice(bytes);
        let bgr = imdecode(&input, IMREAD_COLOR)?;
        if bgr.empty() {
            return Err(MediaError::Codec("Not a decodable image".to_string()));
        }
        mat_to_pixel_buffer(&bgr)
    }
}

impl StillCodec for JpegCodec {
    fn encode(&self, buffer: &PixelBuffer) -> detection::Result<Vec<u8>> {
        self.encode_jpeg(buffer)
            .map_err(|e| DetectionError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> detection::Result<PixelBuffer> {
        self.decode_jpeg(bytes)
            .map_err(|e| DetectionError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_is_jpeg() {
        let codec = JpegCodec::default();
        let bytes = codec
            .encode(&PixelBuffer::filled(16, 16, [200, 40, 10, 255]))
            .unwrap();
        // SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_flat_color_survives_max_quality() {
        let codec = JpegCodec::default();
        let original = PixelBuffer::filled(16, 16, [200, 40, 10, 255]);

        let decoded = codec.decode(&codec.encode(&original).unwrap()).unwrap();

        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
        let [r, g, b, a] = decoded.pixel(8, 8).unwrap();
        assert!(r.abs_diff(200) <= 4 && g.abs_diff(40) <= 4 && b.abs_diff(10) <= 4);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let codec = JpegCodec::default();
        let result = codec.decode(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DetectionError::Decode(_))));
    }

    #[test]
    fn test_empty_frame_fails_to_encode() {
        let codec = JpegCodec::with_quality(150);
        assert_eq!(codec.quality(), 100);
        assert!(matches!(
            codec.encode(&PixelBuffer::empty()),
            Err(DetectionError::Encode(_))
        ));
    }
}
