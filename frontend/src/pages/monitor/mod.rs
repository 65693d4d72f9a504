//! Monitor Page
//!
//! The single screen of the application: live preview on the left, status
//! and controls on the right.

mod components;
mod state;

pub use state::MonitorState;

use crate::events::UiCommand;
use components::{render_controls, render_header, render_preview, render_status_panel};

const SIDE_PANEL_WIDTH: f32 = 360.0;

pub struct Monitor;

impl Monitor {
    pub fn show(ui: &mut egui::Ui, state: &MonitorState) -> Option<UiCommand> {
        let mut command = None;

        ui.add_space(10.0);
        render_header(ui, state.is_monitoring());
        ui.add_space(20.0);

        ui.horizontal_top(|ui| {
            ui.add_space(20.0);

            let preview_width = ui.available_width() - SIDE_PANEL_WIDTH - 60.0;
            ui.vertical(|ui| {
                render_preview(
                    ui,
                    state.preview_texture.as_ref(),
                    state.is_monitoring(),
                    preview_width,
                );
            });

            ui.add_space(20.0);

            ui.vertical(|ui| {
                ui.set_width(SIDE_PANEL_WIDTH);
                render_status_panel(ui, state);
                ui.add_space(20.0);
                command = render_controls(ui, state);
            });
        });

        command
    }
}
