//! cpal-based alarm tone.

use crate::error::{MediaError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use detection::{ToneFactory, ToneHandle, ToneSpec};
use logging::Logger;

/// Opens a new output stream for every alarm.
pub struct CpalToneFactory {
    logger: Logger,
}

impl CpalToneFactory {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl ToneFactory for CpalToneFactory {
    fn start_tone(&mut self, spec: &ToneSpec) -> detection::Result<Box<dyn ToneHandle>> {
        let tone = CpalTone::start(*spec, &self.logger)?;
        Ok(Box::new(tone))
    }
}

/// A playing tone on the default output device.
///
/// The samples come from [`ToneSpec::sample_at`], written to every
/// channel. Dropping the tone closes the stream.
pub struct CpalTone {
    stream: Option<cpal::Stream>,
    logger: Logger,
}

impl CpalTone {
    pub fn start(spec: ToneSpec, logger: &Logger) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| MediaError::Audio("No output device available".into()))?;

        let default_config = device
            .default_output_config()
            .map_err(|e| MediaError::Audio(format!("Failed to get default config: {}", e)))?;
        let sample_rate = default_config.sample_rate().0;
        let channels = usize::from(default_config.channels()).max(1);
        let config: cpal::StreamConfig = default_config.into();

        logger.debug(&format!(
            "Tone on {}: {}Hz, {} channels",
            device.name().unwrap_or_default(),
            sample_rate,
            channels
        ));

        let mut index = 0u64;
        let error_logger = logger.clone();
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        frame.fill(spec.sample_at(index, sample_rate));
                        index += 1;
                    }
                },
                move |err| error_logger.error(&format!("Tone stream error: {}", err)),
                None,
            )
            .map_err(|e| MediaError::Audio(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| MediaError::Audio(format!("Failed to play stream: {}", e)))?;

        Ok(Self {
            stream: Some(stream),
            logger: logger.clone(),
        })
    }
}

impl ToneHandle for CpalTone {
    fn halt(&mut self) {
        if let Some(stream) = self.stream.take()
            && let Err(e) = stream.pause()
        {
            self.logger.warn(&format!("Failed to pause tone: {}", e));
        }
    }
}

impl Drop for CpalTone {
    fn drop(&mut self) {
        self.halt();
    }
}
