//! Camera capture module

pub mod config;
pub mod device;
pub mod sampler;

pub use config::CameraConfig;
pub use device::Camera;
pub use sampler::{CameraSampler, OpenCvCamera};
