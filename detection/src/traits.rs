//! Seams between the detection core and the hardware backends.

use crate::alarm::ToneSpec;
use crate::error::Result;
use crate::pixel_buffer::PixelBuffer;
use crate::timelapse::VideoFormat;
use std::path::PathBuf;

/// A live camera stream.
///
/// Dropping the source releases the device.
pub trait FrameSource {
    /// Returns the current frame at the camera's native resolution.
    ///
    /// `None` when no frame is ready yet; the caller skips the tick.
    fn sample(&mut self) -> Option<PixelBuffer>;
}

/// Opens the camera.
pub trait CameraAccess {
    /// # Errors
    ///
    /// [`DetectionError::Acquisition`](crate::DetectionError::Acquisition)
    /// when the device is missing or access is denied.
    fn acquire(&mut self) -> Result<Box<dyn FrameSource>>;
}

/// Lossy still-image codec used for captured frames.
pub trait StillCodec {
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;
}

/// A running tone generator.
pub trait ToneHandle {
    /// Silences the output. The handle is dropped right after.
    fn halt(&mut self);
}

/// Creates tone generators on the audio output.
pub trait ToneFactory {
    fn start_tone(&mut self, spec: &ToneSpec) -> Result<Box<dyn ToneHandle>>;
}

/// Parameters for opening a video sink.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSinkSpec {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub format: VideoFormat,
}

/// An open video file being written.
///
/// Dropping a sink without calling [`VideoSink::finish`] discards the
/// partial output.
pub trait VideoSink {
    /// Encodes `frame` at presentation time `pts`, counted in encoder ticks
    /// of `1 / fps` seconds.
    fn push_frame(&mut self, frame: &PixelBuffer, pts: i64) -> Result<()>;

    /// Flushes the encoder, finalizes the container and returns the path.
    fn finish(self: Box<Self>) -> Result<PathBuf>;
}

pub trait VideoSinkFactory {
    fn open(&mut self, spec: &VideoSinkSpec) -> Result<Box<dyn VideoSink>>;
}
