//! Firewatch desktop application entry point.

// Application modules
mod app;
mod components;
mod config;
mod events;
mod logic;
mod pages;

use app::App;

fn main() {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("Firewatch - Motion & Fire Monitor"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Firewatch",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(egui::Theme::Dark);

            // Set dark theme with blue tones
            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.window_fill = egui::Color32::from_rgb(15, 23, 42);
            style.visuals.panel_fill = egui::Color32::from_rgb(15, 23, 42);
            cc.egui_ctx.set_style(style);

            Ok(Box::new(App::new()))
        }),
    );

    if let Err(e) = result {
        eprintln!("Failed to start the window: {}", e);
        std::process::exit(1);
    }
}
