//! Application State
//!
//! This module defines the main application state and initialization logic.
//! It implements the MVU (Model-View-Update) pattern's Controller component.
//!
//! # Architecture
//!
//! The `App` struct contains:
//! - **State**: configuration and the last status reported by the logic thread
//! - **Communication**: mpsc channels for logic thread coordination
//! - **Notifications**: toast system for user feedback
//!
//! # MVU Loop
//!
//! The `eframe::App::update()` implementation follows this flow:
//! 1. Process events from logic thread (non-blocking)
//! 2. Render the monitor page (pure function)
//! 3. Handle UI commands from view (state mutations)
//!
//! This ensures unidirectional data flow and predictable state management.

use crate::components::Toast;
use crate::config::{AppConfig, LoadedConfig};
use crate::events::{LogicCommand, LogicEvent, UiCommand};
use crate::pages::{Monitor, MonitorState};
use logging::Logger;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

/// Main application state - MVU Controller
pub struct App {
    // Config
    pub(super) config: AppConfig,

    // Logger
    pub(super) logger: Logger,

    // UI State
    pub(super) monitor: MonitorState,
    pub(super) current_toast: Option<Toast>,

    // Logic Thread Communication
    pub(super) logic_cmd_tx: Sender<LogicCommand>,
    pub(super) logic_evt_rx: Receiver<LogicEvent>,
    pub(super) logic_handle: Option<JoinHandle<()>>,
}

impl App {
    /// Create a new App instance with configuration and logger
    pub fn new() -> Self {
        let LoadedConfig {
            config,
            source,
            warnings,
        } = AppConfig::load();

        let logger = match Logger::with_component(
            &config.log_path,
            config.log_level,
            Some("App"),
            false,
        ) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!(
                    "Failed to open log file '{}': {}, logging disabled",
                    config.log_path.display(),
                    e
                );
                Logger::disabled()
            }
        };

        logger.info("[APP] Initializing application...");
        match source {
            Some(path) => logger.info(&format!(
                "[APP] Configuration loaded from {}",
                path.display()
            )),
            None => logger.info("[APP] No configuration file found, using defaults"),
        }
        for warning in &warnings {
            logger.warn(&format!("[APP] Configuration: {}", warning));
        }
        logger.info(&format!(
            "[APP] Camera {} at {} fps, timelapse {} into {}",
            config.camera_device,
            config.camera_fps,
            config.timelapse_format,
            config.output_dir.display()
        ));

        let (logic_cmd_tx, logic_cmd_rx) = channel();
        let (logic_evt_tx, logic_evt_rx) = channel();

        logger.info("[APP] Starting logic thread...");
        let logic_logger = logger.clone();
        let logic_config = config.clone();
        let logic_handle = std::thread::spawn(move || {
            crate::logic::run_logic_thread(logic_cmd_rx, logic_evt_tx, logic_config, logic_logger);
        });

        let monitor = MonitorState::new(config.sensitivity, config.motion);

        let mut app = Self {
            config,
            logger: logger.clone(),
            monitor,
            current_toast: None,
            logic_cmd_tx,
            logic_evt_rx,
            logic_handle: Some(logic_handle),
        };

        if !warnings.is_empty() {
            app.show_warning(format!(
                "{} configuration problem(s), see the log for details",
                warnings.len()
            ));
        }

        logger.info("[APP] Application initialized successfully");
        app
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- MVU UPDATE LOOP ---

        // 1. Process all pending logic events (from background threads)
        while let Ok(event) = self.logic_evt_rx.try_recv() {
            self.handle_logic_event(ctx, event);
        }

        // 2. Keep polling while frames are coming in
        if self.monitor.is_monitoring() || self.monitor.timelapse_in_progress {
            ctx.request_repaint_after(self.config.tick_interval);
        }

        // 3. Render the view and collect UI commands
        let ui_command = self.render_view(ctx);

        // 4. Process UI command (if any)
        if let Some(command) = ui_command {
            self.handle_ui_command(command);
        }

        // 5. Render toast notification (if any)
        self.render_toast(ctx);
    }

    /// Called when the app is about to close
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.logger.info("[APP] Application shutting down...");

        let _ = self.logic_cmd_tx.send(LogicCommand::Shutdown);
        if let Some(handle) = self.logic_handle.take()
            && handle.join().is_err()
        {
            self.logger.error("[APP] Logic thread panicked");
        }

        self.logger.info("[APP] Cleanup complete, goodbye!");
    }
}

impl App {
    /// Renders the monitor page and returns any UI command
    fn render_view(&mut self, ctx: &egui::Context) -> Option<UiCommand> {
        let mut ui_command = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui_command = Monitor::show(ui, &self.monitor);
        });

        ui_command
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        if let Some(toast) = &self.current_toast {
            // show() returns true if user clicked dismiss OR toast expired
            if toast.show(ctx) {
                self.current_toast = None;
            }
        }
    }

    /// Shows an error toast that stays until dismissed
    pub(super) fn show_error(&mut self, message: String) {
        self.current_toast = Some(Toast::error(message).persistent());
    }

    pub(super) fn show_warning(&mut self, message: String) {
        self.current_toast = Some(Toast::warning(message));
    }

    pub(super) fn show_success(&mut self, message: String) {
        self.current_toast = Some(Toast::success(message));
    }

    pub(super) fn show_info(&mut self, message: String) {
        self.current_toast = Some(Toast::info(message));
    }

    /// Sends a command to the logic thread, reporting a dead thread once
    pub(super) fn send_logic_command(&mut self, command: LogicCommand) {
        if self.logic_cmd_tx.send(command).is_err() {
            self.logger.error("[APP] Logic thread is gone, command dropped");
            self.show_error("Background worker stopped, please restart".to_string());
        }
    }
}
