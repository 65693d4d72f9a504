//! The monitoring session: camera ownership, per-tick detection, alarm and
//! capture decisions.

use crate::alarm::Alarm;
use crate::capture::CaptureStore;
use crate::error::{DetectionError, Result};
use crate::heuristics::{FireConfig, MotionConfig, Sensitivity, detect_fire, detect_motion};
use crate::pixel_buffer::PixelBuffer;
use crate::state::DetectionState;
use crate::traits::{CameraAccess, FrameSource, StillCodec};
use logging::Logger;
use std::time::{Duration, Instant};

/// Tunables of the detection loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub sensitivity: Sensitivity,
    /// Period between ticks, driven by the owner of the session.
    pub tick_interval: Duration,
    /// Minimum spacing between two captures.
    pub capture_cooldown: Duration,
    pub fire: FireConfig,
    pub motion: MotionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::default(),
            tick_interval: Duration::from_millis(100),
            capture_cooldown: Duration::from_millis(1000),
            fire: FireConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A frame was sampled and analysed.
    pub sampled: bool,
    /// Fire went from absent to present on this tick.
    pub fire_started: bool,
    /// Fire went from present to absent on this tick.
    pub fire_cleared: bool,
    /// A still was appended to the capture store.
    pub captured: bool,
}

enum Phase {
    Idle,
    Monitoring {
        source: Box<dyn FrameSource>,
        previous: Option<PixelBuffer>,
        last_capture: Option<Instant>,
    },
}

/// Idle/Monitoring state machine around one camera.
///
/// Dropping the session stops it, which releases the camera and silences
/// the alarm.
pub struct MonitorSession {
    camera: Box<dyn CameraAccess>,
    codec: Box<dyn StillCodec>,
    alarm: Alarm,
    config: SessionConfig,
    phase: Phase,
    state: DetectionState,
    store: CaptureStore,
    logger: Logger,
}

impl MonitorSession {
    pub fn new(
        camera: Box<dyn CameraAccess>,
        codec: Box<dyn StillCodec>,
        alarm: Alarm,
        config: SessionConfig,
        logger: Logger,
    ) -> Self {
        Self {
            camera,
            codec,
            alarm,
            config,
            phase: Phase::Idle,
            state: DetectionState::default(),
            store: CaptureStore::new(),
            logger,
        }
    }

    /// Acquires the camera and enters monitoring. No-op when already
    /// monitoring.
    ///
    /// # Errors
    ///
    /// [`DetectionError::Acquisition`] when the camera cannot be opened; the
    /// session stays idle.
    pub fn start(&mut self) -> Result<()> {
        if self.is_monitoring() {
            return Ok(());
        }

        let source = self.camera.acquire().map_err(|e| match e {
            DetectionError::Acquisition(_) => e,
            other => DetectionError::Acquisition(other.to_string()),
        })?;

        self.phase = Phase::Monitoring {
            source,
            previous: None,
            last_capture: None,
        };
        self.state = DetectionState {
            is_active: true,
            ..DetectionState::default()
        };
        self.logger.info(&format!(
            "Monitoring started (sensitivity {}, tick {} ms)",
            self.config.sensitivity,
            self.config.tick_interval.as_millis()
        ));
        Ok(())
    }

    /// Releases the camera, silences the alarm, resets the flags and drops
    /// every captured frame. Idempotent.
    pub fn stop(&mut self) {
        let was_monitoring = self.is_monitoring();

        self.phase = Phase::Idle;
        self.alarm.stop();
        self.state = DetectionState::default();
        self.store.clear();

        if was_monitoring {
            self.logger.info("Monitoring stopped, camera released");
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Instant::now())
    }

    /// Runs one detection step as of `now`.
    ///
    /// Encoding and audio failures are logged and absorbed.
    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        let Phase::Monitoring {
            source,
            previous,
            last_capture,
        } = &mut self.phase
        else {
            return TickOutcome::default();
        };

        let Some(current) = source.sample() else {
            return TickOutcome::default();
        };
        let mut outcome = TickOutcome {
            sampled: true,
            ..TickOutcome::default()
        };

        let fire = detect_fire(&current, &self.config.fire);
        if fire && !self.state.fire_detected {
            outcome.fire_started = true;
            self.logger.warn("Fire detected");
            if let Err(e) = self.alarm.start() {
                self.logger.error(&format!("Could not sound alarm: {}", e));
            }
        } else if !fire && self.state.fire_detected {
            outcome.fire_cleared = true;
            self.logger.info("Fire no longer detected");
            self.alarm.stop();
        }
        self.state.fire_detected = fire;

        if let Some(prev) = previous.as_ref() {
            self.state.motion_detected = detect_motion(
                &current,
                Some(prev),
                self.config.sensitivity,
                &self.config.motion,
            );
        }

        let cooled_down = last_capture
            .is_none_or(|at| now.saturating_duration_since(at) >= self.config.capture_cooldown);
        if self.state.any_detection() && cooled_down {
            match self.store.capture(&current, self.codec.as_ref(), now) {
                Ok(_) => {
                    *last_capture = Some(now);
                    outcome.captured = true;
                    self.logger.debug(&format!(
                        "Captured frame #{} (motion: {}, fire: {})",
                        self.store.len(),
                        self.state.motion_detected,
                        self.state.fire_detected
                    ));
                }
                Err(e) => self.logger.warn(&format!("Frame capture failed: {}", e)),
            }
        }

        *previous = Some(current);
        outcome
    }

    pub fn is_monitoring(&self) -> bool {
        matches!(self.phase, Phase::Monitoring { .. })
    }

    pub fn state(&self) -> DetectionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.config.sensitivity
    }

    /// Takes effect on the next tick.
    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) {
        self.config.sensitivity = sensitivity;
    }

    pub fn captures(&self) -> &CaptureStore {
        &self.store
    }

    pub fn alarm_sounding(&self) -> bool {
        self.alarm.is_sounding()
    }

    /// The frame analysed on the last successful tick.
    pub fn latest_frame(&self) -> Option<&PixelBuffer> {
        match &self.phase {
            Phase::Monitoring { previous, .. } => previous.as_ref(),
            Phase::Idle => None,
        }
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.stop();
    }
}
