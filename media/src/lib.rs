//! Media Backends
//!
//! OpenCV camera capture and JPEG stills, a cpal tone generator for the
//! alarm and an FFmpeg encoder for timelapse files. Each backend implements
//! one of the hardware traits of the `detection` crate.

pub mod audio;
pub mod common;
pub mod error;
pub mod video;

pub use error::{MediaError, Result};

pub use audio::{CpalTone, CpalToneFactory};
pub use video::{
    Camera, CameraConfig, CameraSampler, FfmpegSinkFactory, FfmpegVideoSink, JpegCodec,
    OpenCvCamera,
};
