//! Camera configuration types.

use crate::error::{MediaError, Result};

/// Camera capture configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Camera device ID (0 for default camera)
    pub device_id: i32,
    /// Requested frame width (None = driver default)
    pub width: Option<u32>,
    /// Requested frame height (None = driver default)
    pub height: Option<u32>,
    /// Requested frames per second
    pub fps: f64,
}

impl CameraConfig {
    const MIN_FPS: f64 = 1.0;
    const MAX_FPS: f64 = 240.0;
    const MAX_DIMENSION: u32 = 7680;

    /// Creates a configuration, clamping `fps` into `[1, 240]`.
    ///
    /// # Errors
    ///
    /// `MediaError::Config` if `fps` is NaN or infinite, or `device_id` is
    /// negative.
    pub fn new(device_id: i32, fps: f64) -> Result<Self> {
        if device_id < 0 {
            return Err(MediaError::Config(format!(
                "Camera device ID must not be negative, got {}",
                device_id
            )));
        }
        if !fps.is_finite() {
            return Err(MediaError::Config(
                "FPS must be a finite number (not NaN or infinite)".to_string(),
            ));
        }

        Ok(Self {
            device_id,
            width: None,
            height: None,
            fps: fps.clamp(Self::MIN_FPS, Self::MAX_FPS),
        })
    }

    /// Requests a specific resolution (1 to 7680 per side).
    pub fn with_resolution(mut self, width: u32, height: u32) -> Result<Self> {
        for (name, value) in [("Width", width), ("Height", height)] {
            if !(1..=Self::MAX_DIMENSION).contains(&value) {
                return Err(MediaError::Config(format!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    Self::MAX_DIMENSION,
                    value
                )));
            }
        }

        self.width = Some(width);
        self.height = Some(height);
        Ok(self)
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Device 0 at 30 fps, driver-chosen resolution.
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: None,
            height: None,
            fps: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CameraConfig::default();
        assert_eq!(config.device_id, 0);
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.resolution(), None);
    }

    #[test]
    fn test_fps_clamping() {
        assert_eq!(CameraConfig::new(0, 0.5).unwrap().fps, 1.0);
        assert_eq!(CameraConfig::new(0, 300.0).unwrap().fps, 240.0);
        assert_eq!(CameraConfig::new(0, 60.0).unwrap().fps, 60.0);
    }

    #[test]
    fn test_rejects_non_finite_fps_and_negative_device() {
        assert!(matches!(
            CameraConfig::new(0, f64::NAN),
            Err(MediaError::Config(_))
        ));
        assert!(CameraConfig::new(0, f64::INFINITY).is_err());
        assert!(CameraConfig::new(-1, 30.0).is_err());
    }

    #[test]
    fn test_with_resolution() {
        let config = CameraConfig::new(1, 15.0)
            .unwrap()
            .with_resolution(1280, 720)
            .unwrap();
        assert_eq!(config.resolution(), Some((1280, 720)));

        assert!(CameraConfig::default().with_resolution(0, 480).is_err());
        assert!(CameraConfig::default().with_resolution(640, 10_000).is_err());
    }
}
