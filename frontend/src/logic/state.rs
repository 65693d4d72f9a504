//! Logic Thread State
//!
//! Owns the monitoring session independent of the UI thread.

use super::timelapse_worker::BackendFactory;
use detection::{MonitorSession, TimelapseAssembler};
use logging::Logger;
use std::thread::JoinHandle;
use std::time::Instant;

/// State maintained by the logic thread.
/// This holds the camera, alarm and captured frames and is independent of egui.
pub struct LogicState {
    pub session: MonitorSession,
    pub assembler: TimelapseAssembler,
    pub backend: BackendFactory,
    pub timelapse_handle: Option<JoinHandle<()>>,
    /// Deadline of the next tick while monitoring
    pub next_tick: Option<Instant>,
    pub logger: Logger,
}

impl LogicState {
    pub fn new(
        session: MonitorSession,
        assembler: TimelapseAssembler,
        backend: BackendFactory,
        logger: Logger,
    ) -> Self {
        Self {
            session,
            assembler,
            backend,
            timelapse_handle: None,
            next_tick: None,
            logger,
        }
    }

    /// Stops monitoring and waits for a running timelapse to finish writing
    pub fn cleanup(&mut self) {
        self.logger.info("[LOGIC_CLEANUP] Stopping monitoring...");
        self.session.stop();
        self.next_tick = None;

        if let Some(handle) = self.timelapse_handle.take() {
            self.logger
                .info("[LOGIC_CLEANUP] Waiting for timelapse worker...");
            if handle.join().is_err() {
                self.logger.error("[LOGIC_CLEANUP] Timelapse worker panicked");
            }
        }

        self.logger.info("[LOGIC_CLEANUP] Cleanup complete");
    }
}
