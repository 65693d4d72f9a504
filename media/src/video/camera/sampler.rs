//! Bridges the OpenCV camera to the detection loop.

use super::config::CameraConfig;
use super::device::Camera;
use crate::video::converters::mat_to_pixel_buffer;
use detection::{CameraAccess, FrameSource, PixelBuffer};
use logging::Logger;
use opencv::core::Mat;

/// Opens a fresh [`Camera`] every time monitoring starts.
pub struct OpenCvCamera {
    config: CameraConfig,
    logger: Logger,
}

impl OpenCvCamera {
    pub fn new(config: CameraConfig, logger: Logger) -> Self {
        Self { config, logger }
    }
}

impl CameraAccess for OpenCvCamera {
    fn acquire(&mut self) -> detection::Result<Box<dyn FrameSource>> {
        let camera = Camera::open(self.config.clone(), self.logger.clone())?;
        Ok(Box::new(CameraSampler::new(camera, self.logger.clone())))
    }
}

/// Pulls frames from an open camera as RGBA buffers.
///
/// Read and conversion failures are logged and reported as "no frame".
pub struct CameraSampler {
    camera: Camera,
    scratch: Mat,
    logger: Logger,
}

impl CameraSampler {
    pub fn new(camera: Camera, logger: Logger) -> Self {
        Self {
            camera,
            scratch: Mat::default(),
            logger,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl FrameSource for CameraSampler {
    fn sample(&mut self) -> Option<PixelBuffer> {
        match self.camera.read_into(&mut self.scratch) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                self.logger.warn(&format!("Frame read failed: {}", e));
                return None;
            }
        }

        match mat_to_pixel_buffer(&self.scratch) {
            Ok(buffer) if !buffer.is_empty() => Some(buffer),
            Ok(_) => None,
            Err(e) => {
                self.logger.warn(&format!("Frame conversion failed: {}", e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detection::DetectionError;

    #[test]
    fn test_missing_device_is_an_acquisition_error() {
        let config = CameraConfig::new(997, 30.0).unwrap();
        let mut access = OpenCvCamera::new(config, Logger::disabled());

        match access.acquire() {
            Err(DetectionError::Acquisition(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("device 997 should not exist"),
        }
    }
}
