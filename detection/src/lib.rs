//! Detection core of the monitor.
//!
//! Everything in this crate is hardware independent: camera, still codec,
//! tone output and video encoder are reached through the traits in
//! [`traits`], so the detection loop and the timelapse assembly can be
//! exercised with in-memory doubles.

pub mod alarm;
pub mod capture;
pub mod error;
pub mod heuristics;
pub mod pixel_buffer;
pub mod session;
pub mod state;
pub mod timelapse;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use alarm::{Alarm, ToneSpec};
pub use capture::{CaptureStore, CapturedFrame};
pub use error::{DetectionError, Result};
pub use heuristics::{FireConfig, MotionConfig, Sensitivity};
pub use pixel_buffer::PixelBuffer;
pub use session::{MonitorSession, SessionConfig, TickOutcome};
pub use state::DetectionState;
pub use timelapse::{
    MIN_TIMELAPSE_FRAMES, Reservation, TimelapseAssembler, TimelapseConfig, TimelapseOutput,
    VideoFormat,
};
pub use traits::{
    CameraAccess, FrameSource, StillCodec, ToneFactory, ToneHandle, VideoSink, VideoSinkFactory,
    VideoSinkSpec,
};
