//! The [`Logger`] handle.

use crate::error::Result;
use crate::log_level::LogLevel;
use crate::log_message::LogMessage;
use crate::log_writer::spawn_writer_thread;
use std::path::Path;
use std::sync::mpsc::{Sender, channel};

/// Cloneable, non-blocking logger.
///
/// All handles derived from one [`Logger::new`] call share a single writer
/// thread; [`Logger::for_component`] only changes the tag in front of each
/// line.
///
/// # Examples
///
/// ```
/// use logging::{Logger, LogLevel};
///
/// let dir = std::env::temp_dir().join("firewatch-doc.log");
/// let logger = Logger::new(&dir, LogLevel::Info).unwrap();
/// let session = logger.for_component("Session");
/// session.info("Monitoring started");
/// ```
#[derive(Clone)]
pub struct Logger {
    sender: Option<Sender<LogMessage>>,
    level: LogLevel,
    component: Option<String>,
    console_output: bool,
}

impl Logger {
    /// Creates a logger writing to `log_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the log file cannot be created or opened.
    pub fn new(log_path: &Path, level: LogLevel) -> Result<Self> {
        Self::with_component(log_path, level, None, false)
    }

    /// Creates a logger with an initial component tag and optional echo to
    /// stdout.
    pub fn with_component(
        log_path: &Path,
        level: LogLevel,
        component: Option<&str>,
        console_output: bool,
    ) -> Result<Self> {
        let (sender, receiver) = channel();
        spawn_writer_thread(log_path, receiver)?;
        Ok(Logger {
            sender: Some(sender),
            level,
            component: component.map(str::to_string),
            console_output,
        })
    }

    /// A logger that discards every message.
    pub fn disabled() -> Self {
        Logger {
            sender: None,
            level: LogLevel::Error,
            component: None,
            console_output: false,
        }
    }

    /// Same writer and level, different component tag.
    pub fn for_component(&self, component: &str) -> Self {
        Logger {
            sender: self.sender.clone(),
            level: self.level,
            component: Some(component.to_string()),
            console_output: self.console_output,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }
        let Some(sender) = &self.sender else {
            return;
        };

        let msg = LogMessage::new(level, self.component.as_deref(), message);
        if self.console_output {
            print!("{}", msg.format());
        }
        // The writer thread only goes away at process exit.
        let _ = sender.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    fn wait_for_write() {
        thread::sleep(Duration::from_millis(50));
    }

    #[test]
    fn test_logger_creates_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(&log_path, LogLevel::Debug).unwrap();
        logger.info("Test message");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Test message"));
    }

    #[test]
    fn test_logger_respects_level() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let logger = Logger::new(&log_path, LogLevel::Warn).unwrap();
        logger.debug("Debug message");
        logger.info("Info message");
        logger.warn("Warn message");
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(!content.contains("Debug message"));
        assert!(!content.contains("Info message"));
        assert!(content.contains("Warn message"));
    }

    #[test]
    fn test_for_component_shares_writer() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("test.log");

        let root = Logger::new(&log_path, LogLevel::Info).unwrap();
        let alarm = root.for_component("Alarm");
        let camera = root.for_component("Camera");

        let handle = thread::spawn(move || alarm.info("tone on"));
        camera.info("device opened");
        handle.join().unwrap();
        wait_for_write();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("[Alarm]: tone on"));
        assert!(content.contains("[Camera]: device opened"));
    }

    #[test]
    fn test_disabled_logger_is_silent() {
        let logger = Logger::disabled();
        logger.error("nowhere");
        assert!(logger.for_component("X").sender.is_none());
    }
}
