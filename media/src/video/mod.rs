//! Video capture, still images and timelapse encoding.

pub mod camera;
pub mod converters;
pub mod still;
pub mod timelapse;

pub use camera::{Camera, CameraConfig, CameraSampler, OpenCvCamera};
pub use converters::{mat_to_pixel_buffer, pixel_buffer_to_mat};
pub use still::JpegCodec;
pub use timelapse::{FfmpegSinkFactory, FfmpegVideoSink};
