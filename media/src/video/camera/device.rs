//! Camera device management.

use crate::common::constants::logging::CAMERA_LOG_INTERVAL;
use crate::error::{MediaError, Result};
use logging::Logger;
use opencv::prelude::*;
use opencv::videoio::{
    CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, VideoCapture,
};

use super::config::CameraConfig;

/// Video capture device
///
/// Opens the device on construction and releases it on drop.
pub struct Camera {
    capture: VideoCapture,
    config: CameraConfig,
    logger: Logger,
    frame_count: u64,
    actual_width: u32,
    actual_height: u32,
    actual_fps: f64,
}

impl Camera {
    /// Opens and configures the camera.
    ///
    /// Requested settings the driver does not honour are logged as
    /// warnings, not errors.
    ///
    /// # Errors
    ///
    /// `MediaError::Camera` if the device cannot be opened.
    pub fn open(config: CameraConfig, logger: Logger) -> Result<Self> {
        logger.info(&format!(
            "Opening camera ID {} @ {} fps",
            config.device_id, config.fps
        ));

        let mut capture = VideoCapture::new(config.device_id, CAP_ANY)
            .map_err(|e| MediaError::Camera(format!("Failed to open camera: {}", e)))?;

        let opened = capture
            .is_opened()
            .map_err(|e| MediaError::Camera(format!("Error verifying camera status: {}", e)))?;
        if !opened {
            return Err(MediaError::Camera(format!(
                "Camera {} is not available",
                config.device_id
            )));
        }

        if let Some((width, height)) = config.resolution() {
            let _ = capture.set(CAP_PROP_FRAME_WIDTH, f64::from(width));
            let _ = capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(height));
        }
        let _ = capture.set(CAP_PROP_FPS, config.fps);

        let actual_width = Self::property(&capture, CAP_PROP_FRAME_WIDTH)? as u32;
        let actual_height = Self::property(&capture, CAP_PROP_FRAME_HEIGHT)? as u32;
        let actual_fps = Self::property(&capture, CAP_PROP_FPS)?;

        logger.info(&format!(
            "Camera configured: {}x{} @ {:.1} FPS",
            actual_width, actual_height, actual_fps
        ));
        if let Some((req_w, req_h)) = config.resolution()
            && (actual_width != req_w || actual_height != req_h)
        {
            logger.warn(&format!(
                "Resolution mismatch (got: {}x{}, requested: {}x{})",
                actual_width, actual_height, req_w, req_h
            ));
        }
        if actual_fps > 0.0 && (actual_fps - config.fps).abs() > 1.0 {
            logger.warn(&format!(
                "FPS mismatch (got: {:.1}, requested: {:.1})",
                actual_fps, config.fps
            ));
        }

        Ok(Camera {
            capture,
            config,
            logger,
            frame_count: 0,
            actual_width,
            actual_height,
            actual_fps,
        })
    }

    /// Reads the next frame into `mat`, reusing its allocation.
    ///
    /// Returns `Ok(false)` when the device had no frame to give.
    pub fn read_into(&mut self, mat: &mut Mat) -> Result<bool> {
        let success = self
            .capture
            .read(mat)
            .map_err(|e| MediaError::Camera(format!("Failed to read frame: {}", e)))?;

        if !success || mat.empty() || mat.cols() == 0 || mat.rows() == 0 {
            return Ok(false);
        }

        self.frame_count += 1;
        if self.frame_count.is_multiple_of(CAMERA_LOG_INTERVAL) {
            self.logger
                .debug(&format!("Frames captured: {}", self.frame_count));
        }
        Ok(true)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn actual_resolution(&self) -> (u32, u32) {
        (self.actual_width, self.actual_height)
    }

    pub fn actual_fps(&self) -> f64 {
        self.actual_fps
    }

    fn property(capture: &VideoCapture, prop: i32) -> Result<f64> {
        capture
            .get(prop)
            .map_err(|e| MediaError::Camera(format!("Error getting property: {}", e)))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.logger.info(&format!(
            "Releasing camera {}. Total frames captured: {}",
            self.config.device_id, self.frame_count
        ));

        if let Err(e) = self.capture.release() {
            self.logger.error(&format!("Error releasing camera: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_invalid_id() {
        let config = CameraConfig::new(999, 30.0).unwrap();
        let result = Camera::open(config, Logger::disabled());
        assert!(matches!(result, Err(MediaError::Camera(_))));
    }
}
