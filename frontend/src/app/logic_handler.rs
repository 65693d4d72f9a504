//! Handles events from the background logic thread.

use super::state::App;
use crate::events::{LogicEvent, MonitorStatus};

impl App {
    /// Processes events from the logic thread
    /// Updates application state based on background operations
    pub(super) fn handle_logic_event(&mut self, ctx: &egui::Context, event: LogicEvent) {
        match event {
            LogicEvent::MonitoringStarted => self.handle_monitoring_started(),
            LogicEvent::MonitoringStopped => self.handle_monitoring_stopped(),
            LogicEvent::MonitoringFailed(reason) => self.handle_monitoring_failed(reason),

            LogicEvent::Status(status) => self.handle_status(status),
            LogicEvent::Preview(color_image) => self.handle_preview(ctx, color_image),

            LogicEvent::FireDetected => {
                self.logger.warn("[ALARM] Fire detected, alarm sounding");
                self.show_error("🔥 Fire detected!".to_string());
            }
            LogicEvent::FireCleared => {
                self.logger.info("[ALARM] Fire cleared");
                self.show_info("Fire no longer detected".to_string());
            }

            LogicEvent::TimelapseStarted { frames } => {
                self.monitor.timelapse_in_progress = true;
                self.show_info(format!("Creating timelapse from {} frames...", frames));
            }
            LogicEvent::TimelapseReady(output) => {
                self.monitor.timelapse_in_progress = false;
                self.logger.info(&format!(
                    "[TIMELAPSE] Saved {} ({} stills, {:.1} s)",
                    output.path.display(),
                    output.frames_used,
                    output.duration.as_secs_f32()
                ));
                self.show_success(format!("Timelapse saved to {}", output.path.display()));
                self.monitor.last_timelapse = Some(output.path);
            }
            LogicEvent::TimelapseRejected(reason) => {
                self.monitor.timelapse_in_progress = false;
                self.show_warning(reason);
            }
            LogicEvent::TimelapseFailed(reason) => {
                self.monitor.timelapse_in_progress = false;
                self.show_error(format!("Timelapse failed: {}", reason));
            }
        }
    }

    fn handle_monitoring_started(&mut self) {
        self.logger.info("[MONITOR] Monitoring started");
        self.monitor.camera_error = None;
        self.show_success("Monitoring started".to_string());
    }

    fn handle_monitoring_stopped(&mut self) {
        self.logger.info("[MONITOR] Monitoring stopped");
        self.monitor.clear_preview();
        self.show_info("Monitoring stopped, captured frames cleared".to_string());
    }

    fn handle_monitoring_failed(&mut self, reason: String) {
        self.logger
            .error(&format!("[MONITOR] Could not start monitoring: {}", reason));
        self.monitor.camera_error = Some(reason.clone());
        self.show_error(reason);
    }

    fn handle_status(&mut self, status: MonitorStatus) {
        self.monitor.status = status;
    }

    fn handle_preview(&mut self, ctx: &egui::Context, color_image: egui::ColorImage) {
        // Late frames after a stop are ignored
        if !self.monitor.is_monitoring() {
            return;
        }

        // Update or create preview texture
        match &mut self.monitor.preview_texture {
            Some(tex) => {
                tex.set(color_image, egui::TextureOptions::default());
            }
            None => {
                self.monitor.preview_texture = Some(ctx.load_texture(
                    "camera_preview",
                    color_image,
                    egui::TextureOptions::default(),
                ));
            }
        }
    }
}
