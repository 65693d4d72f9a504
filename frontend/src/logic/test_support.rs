//! Hardware-free doubles for driving the logic loop in tests.

use detection::{
    CameraAccess, DetectionError, FrameSource, PixelBuffer, StillCodec, ToneFactory, ToneHandle,
    ToneSpec, VideoSink, VideoSinkFactory, VideoSinkSpec,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Camera that always shows the same picture, or refuses to open.
pub struct FixedCamera {
    frame: Option<PixelBuffer>,
}

impl FixedCamera {
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            frame: Some(PixelBuffer::filled(8, 8, rgba)),
        }
    }

    pub fn denied() -> Self {
        Self { frame: None }
    }
}

struct FixedSource(PixelBuffer);

impl FrameSource for FixedSource {
    fn sample(&mut self) -> Option<PixelBuffer> {
        Some(self.0.clone())
    }
}

impl CameraAccess for FixedCamera {
    fn acquire(&mut self) -> detection::Result<Box<dyn FrameSource>> {
        match &self.frame {
            Some(frame) => Ok(Box::new(FixedSource(frame.clone()))),
            None => Err(DetectionError::Acquisition(
                "permission denied".to_string(),
            )),
        }
    }
}

/// Width, height, then the raw samples.
pub struct RawCodec;

impl StillCodec for RawCodec {
    fn encode(&self, buffer: &PixelBuffer) -> detection::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(8 + buffer.data().len());
        out.extend_from_slice(&buffer.width().to_le_bytes());
        out.extend_from_slice(&buffer.height().to_le_bytes());
        out.extend_from_slice(buffer.data());
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> detection::Result<PixelBuffer> {
        let (header, data) = bytes
            .split_at_checked(8)
            .ok_or_else(|| DetectionError::Decode("truncated header".to_string()))?;
        let width = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let height = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        PixelBuffer::new(width, height, data.to_vec())
    }
}

pub struct SilentTones;

struct SilentHandle;

impl ToneHandle for SilentHandle {
    fn halt(&mut self) {}
}

impl ToneFactory for SilentTones {
    fn start_tone(&mut self, _spec: &ToneSpec) -> detection::Result<Box<dyn ToneHandle>> {
        Ok(Box::new(SilentHandle))
    }
}

/// Sink factory that only counts; clones share the counters.
#[derive(Clone, Default)]
pub struct RecordingSinks {
    opened: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
    frame_delay: Option<Duration>,
}

impl RecordingSinks {
    /// Takes `frame_delay` for every pushed frame, like a slow encoder.
    pub fn slow(frame_delay: Duration) -> Self {
        Self {
            frame_delay: Some(frame_delay),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

struct RecordingSink {
    path: PathBuf,
    finished: Arc<AtomicUsize>,
    frame_delay: Option<Duration>,
}

impl VideoSink for RecordingSink {
    fn push_frame(&mut self, _frame: &PixelBuffer, _pts: i64) -> detection::Result<()> {
        if let Some(delay) = self.frame_delay {
            std::thread::sleep(delay);
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> detection::Result<PathBuf> {
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(self.path)
    }
}

impl VideoSinkFactory for RecordingSinks {
    fn open(&mut self, spec: &VideoSinkSpec) -> detection::Result<Box<dyn VideoSink>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSink {
            path: spec.path.clone(),
            finished: Arc::clone(&self.finished),
            frame_delay: self.frame_delay,
        }))
    }
}
