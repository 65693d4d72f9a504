use crate::error::Result;
use crate::log_message::LogMessage;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread;

/// Owns the log file on the writer thread.
pub(crate) struct LogWriter {
    out: BufWriter<File>,
}

impl LogWriter {
    /// Opens the file in append mode, creating it if needed.
    pub fn open(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    fn write_message(&mut self, message: &LogMessage) {
        if let Err(e) = self.out.write_all(message.format().as_bytes()) {
            eprintln!("Error writing log: {}", e);
        }
    }

    /// Drains the channel, flushing whenever it runs dry.
    pub fn run(mut self, receiver: Receiver<LogMessage>) {
        while let Ok(message) = receiver.recv() {
            self.write_message(&message);
            for queued in receiver.try_iter() {
                self.write_message(&queued);
            }
            if let Err(e) = self.out.flush() {
                eprintln!("Error flushing log: {}", e);
            }
        }
    }
}

/// Opens the file on the caller's thread so errors surface immediately,
/// then moves the writer to its own thread.
pub(crate) fn spawn_writer_thread(log_path: &Path, receiver: Receiver<LogMessage>) -> Result<()> {
    let writer = LogWriter::open(log_path)?;
    thread::Builder::new()
        .name("log-writer".to_string())
        .spawn(move || writer.run(receiver))?;
    Ok(())
}
