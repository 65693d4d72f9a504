//! Monitor Header Component
//!
//! Displays the application title and whether the camera is being watched.

use egui::{Color32, FontId, RichText};

/// Renders the page title with a monitoring label on the right
pub fn render_header(ui: &mut egui::Ui, monitoring: bool) {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.label(
            RichText::new("🔥 Firewatch")
                .font(FontId::proportional(32.0))
                .color(Color32::WHITE),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            render_monitoring_label(ui, monitoring);
        });
    });
}

fn render_monitoring_label(ui: &mut egui::Ui, monitoring: bool) {
    let (text, color) = if monitoring {
        ("● Monitoring", Color32::from_rgb(34, 197, 94))
    } else {
        ("○ Idle", Color32::GRAY)
    };
    ui.label(
        RichText::new(text)
            .font(FontId::proportional(18.0))
            .color(color),
    );
}
