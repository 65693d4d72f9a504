//! Timelapse Worker Thread
//!
//! Encoding runs off the logic thread so ticks keep coming while a file is
//! being written. The worker owns its codec and sink factory and reports
//! the outcome as a single event.

use crate::events::LogicEvent;
use detection::{
    CapturedFrame, DetectionError, Reservation, StillCodec, TimelapseAssembler, VideoSinkFactory,
};
use logging::Logger;
use std::io;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// Codec and encoder used by one timelapse run.
pub struct TimelapseBackend {
    pub codec: Box<dyn StillCodec + Send>,
    pub sinks: Box<dyn VideoSinkFactory + Send>,
}

/// Builds a fresh backend for every run.
pub type BackendFactory = Box<dyn Fn() -> TimelapseBackend + Send>;

/// Spawns the worker over an already taken snapshot of captured frames.
/// The reservation was taken on the logic thread and is released by the
/// worker once the file is written or the run fails.
pub fn spawn_timelapse_worker(
    assembler: TimelapseAssembler,
    reservation: Reservation,
    frames: Vec<CapturedFrame>,
    backend: TimelapseBackend,
    evt_tx: Sender<LogicEvent>,
    logger: Logger,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("timelapse".to_string())
        .spawn(move || run_timelapse(assembler, reservation, frames, backend, evt_tx, logger))
}

fn run_timelapse(
    assembler: TimelapseAssembler,
    reservation: Reservation,
    frames: Vec<CapturedFrame>,
    mut backend: TimelapseBackend,
    evt_tx: Sender<LogicEvent>,
    logger: Logger,
) {
    let result = assembler.assemble_reserved(
        reservation,
        &frames,
        backend.codec.as_ref(),
        backend.sinks.as_mut(),
    );

    let event = match result {
        Ok(output) => LogicEvent::TimelapseReady(output),
        Err(e @ (DetectionError::NotEnoughFrames { .. } | DetectionError::AssemblyInProgress)) => {
            logger.warn(&format!("[TIMELAPSE] Request rejected: {}", e));
            LogicEvent::TimelapseRejected(e.to_string())
        }
        Err(e) => {
            logger.error(&format!("[TIMELAPSE] Assembly failed: {}", e));
            LogicEvent::TimelapseFailed(e.to_string())
        }
    };
    let _ = evt_tx.send(event);
}
