//! Detection Status Panel
//!
//! Indicators for monitoring, motion, fire and the alarm, plus what has
//! been captured so far.

use super::super::state::MonitorState;
use crate::components::Card;
use detection::MIN_TIMELAPSE_FRAMES;
use egui::{Color32, FontId, RichText};

const ON_GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const MOTION_AMBER: Color32 = Color32::from_rgb(245, 158, 11);
const FIRE_RED: Color32 = Color32::from_rgb(239, 68, 68);
const OFF_GRAY: Color32 = Color32::from_rgb(100, 116, 139);

/// Renders the status card
pub fn render_status_panel(ui: &mut egui::Ui, state: &MonitorState) {
    Card::new().inner_margin(16.0).show(ui, |ui| {
        ui.label(
            RichText::new("Status")
                .font(FontId::proportional(20.0))
                .color(Color32::WHITE),
        );
        ui.add_space(8.0);

        let detection = state.status.state;
        render_indicator(ui, "Monitoring", detection.is_active, ON_GREEN);
        render_indicator(ui, "Motion", detection.motion_detected, MOTION_AMBER);
        render_indicator(ui, "Fire", detection.fire_detected, FIRE_RED);
        render_indicator(ui, "Alarm", state.status.alarm_sounding, FIRE_RED);

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        render_captures(ui, state);

        if let Some(error) = &state.camera_error {
            ui.add_space(8.0);
            ui.label(RichText::new(error).color(FIRE_RED));
        }
    });
}

/// Renders a colored dot followed by the label
fn render_indicator(ui: &mut egui::Ui, label: &str, on: bool, on_color: Color32) {
    let color = if on { on_color } else { OFF_GRAY };
    ui.horizontal(|ui| {
        ui.label(RichText::new("●").font(FontId::proportional(18.0)).color(color));
        ui.label(
            RichText::new(label)
                .font(FontId::proportional(16.0))
                .color(if on { Color32::WHITE } else { Color32::GRAY }),
        );
    });
}

fn render_captures(ui: &mut egui::Ui, state: &MonitorState) {
    let count = state.status.captured_frames;
    ui.label(
        RichText::new(format!("Captured frames: {}", count))
            .font(FontId::proportional(16.0))
            .color(Color32::WHITE),
    );

    let last = match state.status.last_capture {
        Some(at) => at.format("%H:%M:%S").to_string(),
        None => "never".to_string(),
    };
    ui.label(RichText::new(format!("Last capture: {}", last)).color(Color32::GRAY));

    if count < MIN_TIMELAPSE_FRAMES {
        ui.label(
            RichText::new(format!(
                "{} more frame(s) needed for a timelapse",
                MIN_TIMELAPSE_FRAMES - count
            ))
            .color(Color32::GRAY),
        );
    }

    if let Some(path) = &state.last_timelapse {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("Last timelapse: {}", path.display()))
                .color(Color32::LIGHT_BLUE),
        );
    }
}
