//! Monitor State Management
//!
//! Everything the monitor page shows. The camera, detection and captured
//! frames live in the logic thread; this is only the last reported view.

use crate::events::MonitorStatus;
use detection::{MotionConfig, Sensitivity, heuristics::motion_threshold_percent};
use egui::TextureHandle;
use std::path::PathBuf;

pub struct MonitorState {
    pub preview_texture: Option<TextureHandle>,
    pub status: MonitorStatus,
    pub sensitivity: Sensitivity,
    pub motion: MotionConfig,
    /// Reason the last start attempt failed, shown until the next attempt
    pub camera_error: Option<String>,
    pub timelapse_in_progress: bool,
    pub last_timelapse: Option<PathBuf>,
}

impl MonitorState {
    pub fn new(sensitivity: Sensitivity, motion: MotionConfig) -> Self {
        Self {
            preview_texture: None,
            status: MonitorStatus::default(),
            sensitivity,
            motion,
            camera_error: None,
            timelapse_in_progress: false,
            last_timelapse: None,
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.status.state.is_active
    }

    /// Changed-pixel percentage the current slider position requires
    pub fn threshold_percent(&self) -> f64 {
        motion_threshold_percent(self.sensitivity, &self.motion)
    }

    /// Drops the preview so a stale frame is not shown after stopping
    pub fn clear_preview(&mut self) {
        self.preview_texture = None;
    }
}
