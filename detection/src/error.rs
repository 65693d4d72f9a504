//! Error types for the detection core.

use std::fmt;

pub type Result<T> = std::result::Result<T, DetectionError>;

/// Failures of the detection loop and the timelapse pipeline.
///
/// Per-tick conditions such as "no frame available" or "frame size changed"
/// are not errors; they are reported through `Option` and `bool` results.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// The camera could not be opened (missing device, permission denied).
    Acquisition(String),
    /// Pixel data whose length does not match the declared dimensions.
    InvalidBuffer(String),
    /// A timelapse was requested with fewer frames than required.
    NotEnoughFrames { available: usize, required: usize },
    /// A stored still could not be decoded.
    Decode(String),
    /// A still or the output video could not be encoded.
    Encode(String),
    /// The tone generator could not be started.
    Audio(String),
    /// Another timelapse is already being assembled.
    AssemblyInProgress,
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Acquisition(msg) => write!(f, "Camera access failed: {}", msg),
            DetectionError::InvalidBuffer(msg) => write!(f, "Invalid pixel buffer: {}", msg),
            DetectionError::NotEnoughFrames {
                available,
                required,
            } => write!(
                f,
                "Not enough frames for a timelapse: {} captured, {} needed",
                available, required
            ),
            DetectionError::Decode(msg) => write!(f, "Decode error: {}", msg),
            DetectionError::Encode(msg) => write!(f, "Encode error: {}", msg),
            DetectionError::Audio(msg) => write!(f, "Audio error: {}", msg),
            DetectionError::AssemblyInProgress => {
                write!(f, "A timelapse is already being created")
            }
        }
    }
}

impl std::error::Error for DetectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_display() {
        let err = DetectionError::Acquisition("device 0 not found".to_string());
        assert_eq!(err.to_string(), "Camera access failed: device 0 not found");
    }

    #[test]
    fn test_not_enough_frames_display() {
        let err = DetectionError::NotEnoughFrames {
            available: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "Not enough frames for a timelapse: 1 captured, 2 needed"
        );
    }
}
