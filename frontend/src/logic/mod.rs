// Main logic thread coordinator

mod state;
mod timelapse_worker;
mod utils;

#[cfg(test)]
mod test_support;

use crate::config::AppConfig;
use crate::events::{LogicCommand, LogicEvent, MonitorStatus};
use detection::{
    Alarm, MIN_TIMELAPSE_FRAMES, MonitorSession, TickOutcome, TimelapseAssembler, ToneSpec,
};
use logging::Logger;
use media::{CpalToneFactory, FfmpegSinkFactory, JpegCodec, OpenCvCamera};
use state::LogicState;
use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Instant;
use timelapse_worker::{BackendFactory, TimelapseBackend, spawn_timelapse_worker};
use utils::pixel_buffer_to_color_image;

/// Main function of the logic thread.
/// Builds the hardware-backed session, then receives `LogicCommand`s and
/// sends `LogicEvent`s back to the UI thread until shutdown.
pub fn run_logic_thread(
    cmd_rx: Receiver<LogicCommand>,
    evt_tx: Sender<LogicEvent>,
    config: AppConfig,
    logger: Logger,
) {
    let alarm_logger = logger.for_component("Alarm");
    let alarm = Alarm::new(
        Box::new(CpalToneFactory::new(alarm_logger.clone())),
        ToneSpec::default(),
        alarm_logger,
    );
    let session = MonitorSession::new(
        Box::new(OpenCvCamera::new(
            config.camera_config(),
            logger.for_component("Camera"),
        )),
        Box::new(JpegCodec::default()),
        alarm,
        config.session_config(),
        logger.for_component("Session"),
    );

    let timelapse_logger = logger.for_component("Timelapse");
    let assembler = TimelapseAssembler::new(config.timelapse_config(), timelapse_logger.clone());
    let backend: BackendFactory = Box::new(move || TimelapseBackend {
        codec: Box::new(JpegCodec::default()),
        sinks: Box::new(FfmpegSinkFactory::new(timelapse_logger.clone())),
    });

    let mut state = LogicState::new(session, assembler, backend, logger.for_component("Logic"));
    run_command_loop(&mut state, &cmd_rx, &evt_tx);
    state.cleanup();
}

/// Waits for commands while idle; while monitoring, wakes up for each tick
/// deadline and handles commands in between. Never runs two things at once.
fn run_command_loop(
    state: &mut LogicState,
    cmd_rx: &Receiver<LogicCommand>,
    evt_tx: &Sender<LogicEvent>,
) {
    loop {
        let received = match state.next_tick {
            Some(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                cmd_rx.recv_timeout(timeout)
            }
            None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(command) => {
                if handle_command(state, command, evt_tx).is_break() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => run_tick(state, evt_tx),
            Err(RecvTimeoutError::Disconnected) => {
                state.logger.info("[LOGIC] UI channel closed, leaving loop");
                break;
            }
        }
    }
}

fn handle_command(
    state: &mut LogicState,
    command: LogicCommand,
    evt_tx: &Sender<LogicEvent>,
) -> ControlFlow<()> {
    match command {
        LogicCommand::StartMonitoring => handle_start_monitoring(state, evt_tx),
        LogicCommand::StopMonitoring => handle_stop_monitoring(state, evt_tx),
        LogicCommand::SetSensitivity(sensitivity) => {
            state.session.set_sensitivity(sensitivity);
            state
                .logger
                .debug(&format!("[LOGIC] Sensitivity set to {}", sensitivity));
        }
        LogicCommand::CreateTimelapse => handle_create_timelapse(state, evt_tx),
        LogicCommand::Shutdown => {
            state.logger.info("[LOGIC] Shutdown requested");
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

fn handle_start_monitoring(state: &mut LogicState, evt_tx: &Sender<LogicEvent>) {
    if state.session.is_monitoring() {
        return;
    }

    match state.session.start() {
        Ok(()) => {
            state.next_tick = Some(Instant::now());
            let _ = evt_tx.send(LogicEvent::MonitoringStarted);
            publish_status(state, evt_tx);
        }
        Err(e) => {
            state
                .logger
                .error(&format!("[LOGIC] Could not start monitoring: {}", e));
            let _ = evt_tx.send(LogicEvent::MonitoringFailed(e.to_string()));
        }
    }
}

fn handle_stop_monitoring(state: &mut LogicState, evt_tx: &Sender<LogicEvent>) {
    state.session.stop();
    state.next_tick = None;
    let _ = evt_tx.send(LogicEvent::MonitoringStopped);
    publish_status(state, evt_tx);
}

fn handle_create_timelapse(state: &mut LogicState, evt_tx: &Sender<LogicEvent>) {
    // Taken here so a request queued right behind this one sees it
    let reservation = match state.assembler.try_reserve() {
        Ok(reservation) => reservation,
        Err(_) => {
            let _ = evt_tx.send(LogicEvent::TimelapseRejected(
                "A timelapse is already being created".to_string(),
            ));
            return;
        }
    };

    let frames = state.session.captures().snapshot();
    if frames.len() < MIN_TIMELAPSE_FRAMES {
        let _ = evt_tx.send(LogicEvent::TimelapseRejected(format!(
            "Need at least {} captured frames, have {}",
            MIN_TIMELAPSE_FRAMES,
            frames.len()
        )));
        return;
    }

    // The previous worker already gave up its reservation and is only
    // reporting its result
    if let Some(handle) = state.timelapse_handle.take()
        && handle.join().is_err()
    {
        state.logger.error("[LOGIC] Previous timelapse worker panicked");
    }

    let count = frames.len();
    let backend = (state.backend)();
    match spawn_timelapse_worker(
        state.assembler.clone(),
        reservation,
        frames,
        backend,
        evt_tx.clone(),
        state.logger.clone(),
    ) {
        Ok(handle) => {
            state.timelapse_handle = Some(handle);
            state
                .logger
                .info(&format!("[LOGIC] Timelapse worker started with {} frames", count));
            let _ = evt_tx.send(LogicEvent::TimelapseStarted { frames: count });
        }
        Err(e) => {
            state
                .logger
                .error(&format!("[LOGIC] Could not spawn timelapse worker: {}", e));
            let _ = evt_tx.send(LogicEvent::TimelapseFailed(e.to_string()));
        }
    }
}

/// One tick, then the next deadline. Missed deadlines are dropped rather
/// than replayed in a burst.
fn run_tick(state: &mut LogicState, evt_tx: &Sender<LogicEvent>) {
    let outcome = state.session.tick();
    publish_tick(state, outcome, evt_tx);

    let interval = state.session.config().tick_interval;
    let now = Instant::now();
    state.next_tick = state.next_tick.map(|deadline| {
        let next = deadline + interval;
        if next < now { now + interval } else { next }
    });
}

fn publish_tick(state: &LogicState, outcome: TickOutcome, evt_tx: &Sender<LogicEvent>) {
    if outcome.fire_started {
        let _ = evt_tx.send(LogicEvent::FireDetected);
    }
    if outcome.fire_cleared {
        let _ = evt_tx.send(LogicEvent::FireCleared);
    }
    if outcome.sampled
        && let Some(frame) = state.session.latest_frame()
    {
        let _ = evt_tx.send(LogicEvent::Preview(pixel_buffer_to_color_image(frame)));
    }
    publish_status(state, evt_tx);
}

fn publish_status(state: &LogicState, evt_tx: &Sender<LogicEvent>) {
    let captures = state.session.captures();
    let _ = evt_tx.send(LogicEvent::Status(MonitorStatus {
        state: state.session.state(),
        captured_frames: captures.len(),
        last_capture: captures.last().map(|frame| frame.wall_clock()),
        alarm_sounding: state.session.alarm_sounding(),
    }));
}
