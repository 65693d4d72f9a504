//! Card Component
//!
//! Provides a container with rounded corners and shadow effects.

use egui::Color32;

/// A reusable card component with shadow and rounded corners
pub struct Card {
    inner_margin: f32,
}

impl Card {
    /// Creates a new card with default settings
    pub fn new() -> Self {
        Self { inner_margin: 10.0 }
    }

    /// Sets the inner margin (padding) of the card
    pub fn inner_margin(mut self, margin: f32) -> Self {
        self.inner_margin = margin;
        self
    }

    /// Renders the card with custom content
    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        egui::Frame::new()
            .fill(Color32::from_rgb(30, 41, 59))
            .corner_radius(12.0)
            .inner_margin(self.inner_margin)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(51, 65, 85)))
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 24,
                spread: 0,
                color: Color32::from_black_alpha(40),
            })
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                add_contents(ui)
            })
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}
