//! UI Command Handler
//!
//! This module dispatches UI commands to the logic thread and applies the
//! optimistic part of each change to the view state.

use super::state::App;
use crate::events::{LogicCommand, UiCommand};
use detection::Sensitivity;

impl App {
    /// Dispatches UI commands to appropriate handlers
    /// This is the main entry point for all UI actions
    pub(super) fn handle_ui_command(&mut self, command: UiCommand) {
        self.logger
            .debug(&format!("[UI] Handling command: {:?}", command));
        match command {
            UiCommand::ToggleMonitoring => self.handle_toggle_monitoring(),
            UiCommand::SetSensitivity(value) => self.handle_set_sensitivity(value),
            UiCommand::CreateTimelapse => self.handle_create_timelapse(),
        }
    }

    fn handle_toggle_monitoring(&mut self) {
        if self.monitor.is_monitoring() {
            self.logger.info("[UI] Stop monitoring requested");
            self.send_logic_command(LogicCommand::StopMonitoring);
        } else {
            self.logger.info("[UI] Start monitoring requested");
            self.monitor.camera_error = None;
            self.send_logic_command(LogicCommand::StartMonitoring);
        }
    }

    fn handle_set_sensitivity(&mut self, value: u8) {
        let sensitivity = Sensitivity::new(value.into());
        if sensitivity == self.monitor.sensitivity {
            return;
        }
        self.monitor.sensitivity = sensitivity;
        self.send_logic_command(LogicCommand::SetSensitivity(sensitivity));
    }

    fn handle_create_timelapse(&mut self) {
        if self.monitor.timelapse_in_progress {
            self.show_warning("A timelapse is already being created".to_string());
            return;
        }
        self.logger.info(&format!(
            "[UI] Timelapse requested with {} captured frames",
            self.monitor.status.captured_frames
        ));
        self.send_logic_command(LogicCommand::CreateTimelapse);
    }
}
