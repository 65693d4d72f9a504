//! FFmpeg-backed video sink for timelapse files.

mod sink;

pub use sink::{FfmpegSinkFactory, FfmpegVideoSink, codec_id};
