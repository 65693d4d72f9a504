//! Monitor Controls
//!
//! Start/stop toggle, sensitivity slider and the timelapse button.

use super::super::state::MonitorState;
use crate::components::{Button, ButtonVariant};
use crate::events::UiCommand;
use detection::{MIN_TIMELAPSE_FRAMES, Sensitivity};
use egui::{Color32, RichText, Vec2};

/// Renders all controls, returning the command of whichever was used
pub fn render_controls(ui: &mut egui::Ui, state: &MonitorState) -> Option<UiCommand> {
    let mut command = None;

    ui.horizontal(|ui| {
        if let Some(cmd) = render_monitoring_toggle(ui, state.is_monitoring()) {
            command = Some(cmd);
        }

        if let Some(cmd) = render_timelapse_button(ui, state) {
            command = Some(cmd);
        }
    });

    ui.add_space(16.0);

    if let Some(cmd) = render_sensitivity_slider(ui, state) {
        command = Some(cmd);
    }

    command
}

/// Gets the button text and variant based on monitoring state
fn get_toggle_config(monitoring: bool) -> (&'static str, ButtonVariant) {
    if monitoring {
        ("⏹ Stop Monitoring", ButtonVariant::Danger)
    } else {
        ("▶ Start Monitoring", ButtonVariant::Primary)
    }
}

fn render_monitoring_toggle(ui: &mut egui::Ui, monitoring: bool) -> Option<UiCommand> {
    let (text, variant) = get_toggle_config(monitoring);

    let clicked = Button::new(text)
        .variant(variant)
        .min_size(Vec2::new(200.0, 50.0))
        .show(ui)
        .clicked();

    ui.add_space(20.0);

    clicked.then_some(UiCommand::ToggleMonitoring)
}

/// Enabled once enough frames exist and no timelapse is being written
fn render_timelapse_button(ui: &mut egui::Ui, state: &MonitorState) -> Option<UiCommand> {
    let ready = state.status.captured_frames >= MIN_TIMELAPSE_FRAMES;
    let text = if state.timelapse_in_progress {
        "⏳ Creating Timelapse..."
    } else {
        "🎞 Create Timelapse"
    };

    let clicked = Button::new(text)
        .variant(ButtonVariant::Secondary)
        .min_size(Vec2::new(200.0, 50.0))
        .enabled(ready && !state.timelapse_in_progress)
        .show(ui)
        .clicked();

    clicked.then_some(UiCommand::CreateTimelapse)
}

fn render_sensitivity_slider(ui: &mut egui::Ui, state: &MonitorState) -> Option<UiCommand> {
    let mut value = state.sensitivity.value();

    let changed = ui
        .horizontal(|ui| {
            ui.label(RichText::new("Sensitivity").color(Color32::WHITE));
            ui.add(egui::Slider::new(
                &mut value,
                Sensitivity::MIN.value()..=Sensitivity::MAX.value(),
            ))
            .changed()
        })
        .inner;

    ui.label(
        RichText::new(format!(
            "Motion needs more than {:.1}% of pixels to change",
            state.threshold_percent()
        ))
        .color(Color32::GRAY),
    );

    changed.then_some(UiCommand::SetSensitivity(value))
}
