//! Error types for media operations.

use detection::DetectionError;
use ffmpeg_next as ffmpeg;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, MediaError>;

/// Error type for media operations
#[derive(Debug)]
pub enum MediaError {
    /// Configuration error
    Config(String),
    /// I/O error
    Io(io::Error),
    /// Camera error
    Camera(String),
    /// Audio output error
    Audio(String),
    /// OpenCV error
    OpenCv(opencv::Error),
    /// Still image or video codec error
    Codec(String),
    /// FFmpeg error
    Ffmpeg(ffmpeg::Error),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Config(msg) => write!(f, "Config error: {}", msg),
            MediaError::Io(err) => write!(f, "I/O error: {}", err),
            MediaError::Camera(msg) => write!(f, "Camera error: {}", msg),
            MediaError::Audio(msg) => write!(f, "Audio error: {}", msg),
            MediaError::OpenCv(err) => write!(f, "OpenCV error: {}", err),
            MediaError::Codec(msg) => write!(f, "Codec error: {}", msg),
            MediaError::Ffmpeg(err) => write!(f, "FFmpeg error: {}", err),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<io::Error> for MediaError {
    fn from(err: io::Error) -> Self {
        MediaError::Io(err)
    }
}

impl From<opencv::Error> for MediaError {
    fn from(err: opencv::Error) -> Self {
        MediaError::OpenCv(err)
    }
}

impl From<ffmpeg::Error> for MediaError {
    fn from(err: ffmpeg::Error) -> Self {
        MediaError::Ffmpeg(err)
    }
}

/// Maps backend failures onto the detection taxonomy.
///
/// Still-codec errors are mapped at the call site, where it is known
/// whether the failure happened while encoding or decoding.
impl From<MediaError> for DetectionError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Camera(msg) => DetectionError::Acquisition(msg),
            MediaError::Audio(msg) => DetectionError::Audio(msg),
            other => DetectionError::Encode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_camera() {
        let err = MediaError::Camera("Device not found".to_string());
        assert_eq!(err.to_string(), "Camera error: Device not found");
    }

    #[test]
    fn test_error_display_codec() {
        let err = MediaError::Codec("Encoding failed".to_string());
        assert_eq!(err.to_string(), "Codec error: Encoding failed");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let media_err: MediaError = io_err.into();
        assert!(matches!(media_err, MediaError::Io(_)));
    }

    #[test]
    fn test_conversion_to_detection_error() {
        let camera: DetectionError = MediaError::Camera("busy".to_string()).into();
        assert_eq!(camera, DetectionError::Acquisition("busy".to_string()));

        let audio: DetectionError = MediaError::Audio("no device".to_string()).into();
        assert_eq!(audio, DetectionError::Audio("no device".to_string()));

        let codec: DetectionError = MediaError::Codec("vp8 missing".to_string()).into();
        assert!(matches!(codec, DetectionError::Encode(_)));
    }
}
