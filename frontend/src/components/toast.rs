//! Toast notification component for displaying transient messages to users
//!
//! Supports error, warning, success, and info types with distinct styles.
//! A toast either expires after its duration or stays until dismissed.

use std::time::{Duration, Instant};

const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// Toast notification type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Error,
    Warning,
    Success,
    Info,
}

impl ToastType {
    fn icon(&self) -> &str {
        match self {
            ToastType::Error => "❌",
            ToastType::Warning => "⚠",
            ToastType::Success => "✅",
            ToastType::Info => "ℹ",
        }
    }

    fn icon_color(&self) -> egui::Color32 {
        match self {
            ToastType::Error => egui::Color32::from_rgb(255, 100, 100),
            ToastType::Warning => egui::Color32::from_rgb(255, 200, 100),
            ToastType::Success => egui::Color32::from_rgb(100, 255, 100),
            ToastType::Info => egui::Color32::from_rgb(100, 150, 255),
        }
    }

    fn background_color(&self) -> egui::Color32 {
        match self {
            ToastType::Error => egui::Color32::from_rgba_premultiplied(80, 30, 30, 230),
            ToastType::Warning => egui::Color32::from_rgba_premultiplied(80, 70, 30, 230),
            ToastType::Success => egui::Color32::from_rgba_premultiplied(30, 80, 30, 230),
            ToastType::Info => egui::Color32::from_rgba_premultiplied(30, 50, 80, 230),
        }
    }
}

/// Toast notification for displaying messages to users
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    /// `None` keeps the toast until the user dismisses it
    pub duration: Option<Duration>,
}

impl Toast {
    /// Creates a new toast with the specified type and default 5-second duration
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            message,
            toast_type,
            created_at: Instant::now(),
            duration: Some(DEFAULT_DURATION),
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn warning(message: String) -> Self {
        Self::new(message, ToastType::Warning)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }

    /// Keeps the toast on screen until dismissed
    pub fn persistent(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Checks if the toast has expired based on creation time
    pub fn is_expired(&self) -> bool {
        self.duration
            .is_some_and(|duration| self.created_at.elapsed() > duration)
    }

    /// Renders the toast notification and returns true if it should be dismissed
    pub fn show(&self, ctx: &egui::Context) -> bool {
        if self.is_expired() {
            return true;
        }

        let mut should_dismiss = false;

        egui::Window::new("notification")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
            .fixed_size(egui::vec2(350.0, 80.0))
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(self.toast_type.background_color())
                    .stroke(egui::Stroke::new(
                        1.5,
                        self.toast_type.icon_color().linear_multiply(0.7),
                    ))
                    .corner_radius(8.0)
                    .shadow(egui::epaint::Shadow {
                        offset: [0, 4],
                        blur: 16,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(100),
                    }),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.toast_type.icon())
                            .size(28.0)
                            .color(self.toast_type.icon_color()),
                    );

                    ui.add_space(10.0);

                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(&self.message)
                                .size(14.0)
                                .color(egui::Color32::WHITE),
                        );

                        ui.add_space(5.0);

                        let button_color = self.toast_type.icon_color().linear_multiply(0.8);
                        if ui
                            .add(
                                egui::Button::new(
                                    egui::RichText::new("Dismiss").color(egui::Color32::WHITE),
                                )
                                .fill(button_color)
                                .stroke(egui::Stroke::NONE)
                                .corner_radius(4.0),
                            )
                            .clicked()
                        {
                            should_dismiss = true;
                        }
                    });
                });
            });

        // Expiry is checked on the next frame
        if let Some(duration) = self.duration {
            ctx.request_repaint_after(duration.saturating_sub(self.created_at.elapsed()));
        }

        should_dismiss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_is_not_expired() {
        let toast = Toast::info("hello".to_string());
        assert_eq!(toast.toast_type, ToastType::Info);
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_toast_expires_after_duration() {
        let mut toast = Toast::warning("careful".to_string());
        toast.created_at = Instant::now() - Duration::from_secs(6);
        assert!(toast.is_expired());
    }

    #[test]
    fn test_persistent_toast_never_expires() {
        let mut toast = Toast::error("camera".to_string()).persistent();
        toast.created_at = Instant::now() - Duration::from_secs(6);
        assert!(!toast.is_expired());
    }
}
