//! Audible fire alarm.

use crate::error::Result;
use crate::traits::{ToneFactory, ToneHandle};
use logging::Logger;
use std::time::Duration;

/// A gated square wave: `gate` of tone, `gate` of silence, repeating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub gate: Duration,
    /// Peak amplitude in `[0, 1]`.
    pub amplitude: f32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: 440.0,
            gate: Duration::from_millis(200),
            amplitude: 0.2,
        }
    }
}

impl ToneSpec {
    /// Whether the gate is open at sample `index`.
    pub fn is_gate_open(&self, index: u64, sample_rate: u32) -> bool {
        let gate_samples = (self.gate.as_micros() as u64 * sample_rate as u64 / 1_000_000).max(1);
        (index / gate_samples).is_multiple_of(2)
    }

    /// Mono sample value at `index` for a stream at `sample_rate` Hz.
    pub fn sample_at(&self, index: u64, sample_rate: u32) -> f32 {
        if sample_rate == 0 || !self.is_gate_open(index, sample_rate) {
            return 0.0;
        }
        let phase = (index as f64 * self.frequency_hz as f64 / sample_rate as f64).fract();
        if phase < 0.5 {
            self.amplitude
        } else {
            -self.amplitude
        }
    }
}

/// Owns at most one running tone.
///
/// `start` and `stop` are idempotent. Every `start` after a `stop` gets a
/// fresh generator from the factory.
pub struct Alarm {
    factory: Box<dyn ToneFactory>,
    spec: ToneSpec,
    active: Option<Box<dyn ToneHandle>>,
    logger: Logger,
}

impl Alarm {
    pub fn new(factory: Box<dyn ToneFactory>, spec: ToneSpec, logger: Logger) -> Self {
        Self {
            factory,
            spec,
            active: None,
            logger,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Ok(());
        }
        let handle = self.factory.start_tone(&self.spec)?;
        self.active = Some(handle);
        self.logger.info(&format!(
            "Alarm on ({} Hz, {} ms gate)",
            self.spec.frequency_hz,
            self.spec.gate.as_millis()
        ));
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.halt();
            self.logger.info("Alarm off");
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingTones;

    #[test]
    fn test_gate_alternates_every_200ms() {
        let spec = ToneSpec::default();
        // 1 kHz: 200 samples per gate.
        assert!(spec.is_gate_open(0, 1000));
        assert!(spec.is_gate_open(199, 1000));
        assert!(!spec.is_gate_open(200, 1000));
        assert!(!spec.is_gate_open(399, 1000));
        assert!(spec.is_gate_open(400, 1000));
        assert_eq!(spec.sample_at(250, 1000), 0.0);
    }

    #[test]
    fn test_square_wave_levels() {
        let spec = ToneSpec::default();
        // 440 Hz at 1 kHz: phase 0.0, 0.44, 0.88
        assert_eq!(spec.sample_at(0, 1000), 0.2);
        assert_eq!(spec.sample_at(1, 1000), 0.2);
        assert_eq!(spec.sample_at(2, 1000), -0.2);
    }

    #[test]
    fn test_one_second_has_half_duty() {
        let spec = ToneSpec::default();
        let rate = 48_000;
        let audible = (0..rate as u64)
            .filter(|&i| spec.is_gate_open(i, rate))
            .count();
        // 0-200, 400-600, 800-1000 ms
        assert_eq!(audible, 28_800);
    }

    #[test]
    fn test_double_start_keeps_one_generator() {
        let tones = CountingTones::default();
        let mut alarm = Alarm::new(Box::new(tones.clone()), ToneSpec::default(), Logger::disabled());

        alarm.start().unwrap();
        alarm.start().unwrap();

        assert!(alarm.is_sounding());
        assert_eq!(tones.active(), 1);
        assert_eq!(tones.created(), 1);
    }

    #[test]
    fn test_stop_is_idempotent_and_restart_is_fresh() {
        let tones = CountingTones::default();
        let mut alarm = Alarm::new(Box::new(tones.clone()), ToneSpec::default(), Logger::disabled());

        alarm.stop();
        alarm.start().unwrap();
        alarm.stop();
        alarm.stop();
        assert_eq!(tones.active(), 0);

        alarm.start().unwrap();
        assert_eq!(tones.created(), 2);
        assert_eq!(tones.active(), 1);

        drop(alarm);
        assert_eq!(tones.active(), 0);
    }

    #[test]
    fn test_failed_start_leaves_alarm_silent() {
        let tones = CountingTones::failing();
        let mut alarm = Alarm::new(Box::new(tones.clone()), ToneSpec::default(), Logger::disabled());

        assert!(alarm.start().is_err());
        assert!(!alarm.is_sounding());
    }
}
