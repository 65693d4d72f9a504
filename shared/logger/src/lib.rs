//! Non-blocking file logger shared by every crate of the monitor.
//!
//! Messages are formatted on the caller's thread and handed to a single
//! writer thread over a channel, so logging from the detection loop never
//! waits on disk I/O.

pub mod error;
mod log_level;
mod log_message;
mod log_writer;
mod logger;

pub use error::{LoggingError, Result};
pub use log_level::LogLevel;
pub use logger::Logger;
