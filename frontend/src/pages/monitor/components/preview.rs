//! Camera Preview Component
//!
//! Shows the last sampled frame, or a placeholder box when there is none.

use egui::{Color32, FontId, RichText, TextureHandle, Vec2};

/// Renders the preview at the largest 4:3 size that fits `max_width`
pub fn render_preview(
    ui: &mut egui::Ui,
    texture: Option<&TextureHandle>,
    monitoring: bool,
    max_width: f32,
) {
    let width = max_width.max(160.0);
    let height = width * 0.75;

    match texture {
        Some(texture) if monitoring => {
            let size = texture.size_vec2();
            let scale = (width / size.x).min(height / size.y);
            ui.image((texture.id(), size * scale));
        }
        _ if monitoring => render_placeholder(ui, width, height, "Camera Starting..."),
        _ => render_placeholder(ui, width, height, "Camera Off"),
    }
}

/// Renders a placeholder box with a message
fn render_placeholder(ui: &mut egui::Ui, width: f32, height: f32, text: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(45, 55, 72))
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.set_min_size(Vec2::new(width, height));
            ui.vertical_centered(|ui| {
                ui.add_space(height / 2.0 - 20.0);
                ui.label(
                    RichText::new(text)
                        .font(FontId::proportional(20.0))
                        .color(Color32::GRAY),
                );
            });
        });
}
