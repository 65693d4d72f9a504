//! In-memory doubles for the hardware traits.

use crate::alarm::ToneSpec;
use crate::error::{DetectionError, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::traits::{
    CameraAccess, FrameSource, StillCodec, ToneFactory, ToneHandle, VideoSink, VideoSinkFactory,
    VideoSinkSpec,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stores width and height as two little-endian u32 followed by the samples.
pub struct RawCodec;

impl StillCodec for RawCodec {
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(8 + buffer.data().len());
        out.extend_from_slice(&buffer.width().to_le_bytes());
        out.extend_from_slice(&buffer.height().to_le_bytes());
        out.extend_from_slice(buffer.data());
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        if bytes.len() < 8 {
            return Err(DetectionError::Decode("truncated header".to_string()));
        }
        let width = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let height = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        PixelBuffer::new(width, height, bytes[8..].to_vec())
            .map_err(|e| DetectionError::Decode(e.to_string()))
    }
}

pub struct FailingCodec;

impl StillCodec for FailingCodec {
    fn encode(&self, _buffer: &PixelBuffer) -> Result<Vec<u8>> {
        Err(DetectionError::Encode("encoder unavailable".to_string()))
    }

    fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer> {
        Err(DetectionError::Decode("decoder unavailable".to_string()))
    }
}

/// Tone factory that counts generators created and still running.
#[derive(Clone, Default)]
pub struct CountingTones {
    created: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingTones {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

struct CountingHandle {
    active: Arc<AtomicUsize>,
}

impl ToneHandle for CountingHandle {
    fn halt(&mut self) {}
}

impl Drop for CountingHandle {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ToneFactory for CountingTones {
    fn start_tone(&mut self, _spec: &ToneSpec) -> Result<Box<dyn ToneHandle>> {
        if self.fail {
            return Err(DetectionError::Audio("no output device".to_string()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingHandle {
            active: Arc::clone(&self.active),
        }))
    }
}

/// Camera that replays a queue of samples. An exhausted queue yields `None`.
#[derive(Clone, Default)]
pub struct ScriptedCamera {
    frames: Arc<Mutex<VecDeque<Option<PixelBuffer>>>>,
    open: Arc<AtomicUsize>,
    deny: bool,
}

impl ScriptedCamera {
    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    pub fn push(&self, frame: Option<PixelBuffer>) {
        self.frames.lock().unwrap().push_back(frame);
    }

    pub fn open_count(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

struct ScriptedSource {
    frames: Arc<Mutex<VecDeque<Option<PixelBuffer>>>>,
    open: Arc<AtomicUsize>,
}

impl FrameSource for ScriptedSource {
    fn sample(&mut self) -> Option<PixelBuffer> {
        self.frames.lock().unwrap().pop_front().flatten()
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CameraAccess for ScriptedCamera {
    fn acquire(&mut self) -> Result<Box<dyn FrameSource>> {
        if self.deny {
            return Err(DetectionError::Acquisition("permission denied".to_string()));
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSource {
            frames: Arc::clone(&self.frames),
            open: Arc::clone(&self.open),
        }))
    }
}

/// What a [`RecordingSinks`] factory saw.
#[derive(Debug, Default)]
pub struct SinkLog {
    pub opened: Vec<VideoSinkSpec>,
    /// (pts, first pixel) per pushed frame.
    pub frames: Vec<(i64, [u8; 4])>,
    pub finished: Vec<PathBuf>,
    pub dropped_unfinished: usize,
}

/// Sink factory that records every call instead of encoding.
#[derive(Clone, Default)]
pub struct RecordingSinks {
    pub log: Arc<Mutex<SinkLog>>,
    pub fail_after: Option<usize>,
}

struct RecordingSink {
    path: PathBuf,
    log: Arc<Mutex<SinkLog>>,
    fail_after: Option<usize>,
    pushed: usize,
    finished: bool,
}

impl VideoSink for RecordingSink {
    fn push_frame(&mut self, frame: &PixelBuffer, pts: i64) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.pushed >= n) {
            return Err(DetectionError::Encode("disk full".to_string()));
        }
        self.pushed += 1;
        let first = frame.pixel(0, 0).unwrap_or([0; 4]);
        self.log.lock().unwrap().frames.push((pts, first));
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<PathBuf> {
        self.finished = true;
        self.log.lock().unwrap().finished.push(self.path.clone());
        Ok(self.path.clone())
    }
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        if !self.finished {
            self.log.lock().unwrap().dropped_unfinished += 1;
        }
    }
}

impl VideoSinkFactory for RecordingSinks {
    fn open(&mut self, spec: &VideoSinkSpec) -> Result<Box<dyn VideoSink>> {
        self.log.lock().unwrap().opened.push(spec.clone());
        Ok(Box::new(RecordingSink {
            path: spec.path.clone(),
            log: Arc::clone(&self.log),
            fail_after: self.fail_after,
            pushed: 0,
            finished: false,
        }))
    }
}
