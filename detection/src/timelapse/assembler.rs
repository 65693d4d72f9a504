use super::canvas::Canvas;
use super::format::VideoFormat;
use super::schedule::{emitted_ticks, ticks_for_slot};
use crate::capture::CapturedFrame;
use crate::error::{DetectionError, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::traits::{StillCodec, VideoSink, VideoSinkFactory, VideoSinkSpec};
use logging::Logger;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Fewest captured frames a timelapse can be made from.
pub const MIN_TIMELAPSE_FRAMES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelapseConfig {
    /// Encoder frame rate.
    pub fps: u32,
    /// Video time each captured still stays on screen.
    pub hold: Duration,
    pub format: VideoFormat,
    pub output_dir: PathBuf,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self {
            fps: 25,
            hold: Duration::from_millis(100),
            format: VideoFormat::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Result of a finished assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelapseOutput {
    pub path: PathBuf,
    pub format: VideoFormat,
    pub frames_used: usize,
    pub frames_skipped: usize,
    pub encoded_frames: u64,
    pub duration: Duration,
}

/// `timelapse-<unix millis>.<ext>`
pub fn timelapse_file_name(created_at_millis: i64, format: VideoFormat) -> String {
    format!("timelapse-{}.{}", created_at_millis, format.extension())
}

/// Exclusive claim on an assembler's in-flight flag.
///
/// Taken with [`TimelapseAssembler::try_reserve`] and released on drop,
/// however the assembly it was handed to ends. It can be moved to another
/// thread, so the claim holds from the moment a run is accepted.
#[derive(Debug)]
pub struct Reservation {
    flag: Arc<AtomicBool>,
}

impl Reservation {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DetectionError::AssemblyInProgress)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Replays captured stills onto an off-screen canvas and encodes them.
///
/// Clones share the in-flight flag, so at most one assembly runs across all
/// of them.
#[derive(Clone)]
pub struct TimelapseAssembler {
    config: TimelapseConfig,
    in_flight: Arc<AtomicBool>,
    logger: Logger,
}

impl TimelapseAssembler {
    pub fn new(config: TimelapseConfig, logger: Logger) -> Self {
        Self {
            config,
            in_flight: Arc::new(AtomicBool::new(false)),
            logger,
        }
    }

    pub fn config(&self) -> &TimelapseConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the in-flight flag shared by every clone of this assembler.
    ///
    /// # Errors
    ///
    /// [`DetectionError::AssemblyInProgress`] while another reservation is
    /// alive.
    pub fn try_reserve(&self) -> Result<Reservation> {
        Reservation::acquire(&self.in_flight)
    }

    /// Builds one video file from `frames`, in order.
    ///
    /// The output size is that of the first frame that decodes. Frames that
    /// fail to decode are skipped and take no screen time.
    ///
    /// # Errors
    ///
    /// - [`DetectionError::NotEnoughFrames`] with fewer than
    ///   [`MIN_TIMELAPSE_FRAMES`] frames; no sink is opened.
    /// - [`DetectionError::AssemblyInProgress`] while another call runs.
    /// - [`DetectionError::Decode`] when no frame decodes at all.
    /// - Any sink error, after which the partial file is discarded.
    pub fn assemble(
        &self,
        frames: &[CapturedFrame],
        codec: &dyn StillCodec,
        sinks: &mut dyn VideoSinkFactory,
    ) -> Result<TimelapseOutput> {
        check_frame_count(frames)?;
        let reservation = self.try_reserve()?;
        self.assemble_reserved(reservation, frames, codec, sinks)
    }

    /// Same as [`assemble`](Self::assemble) under a reservation taken
    /// earlier from this assembler or one of its clones. The reservation is
    /// released when this returns.
    pub fn assemble_reserved(
        &self,
        reservation: Reservation,
        frames: &[CapturedFrame],
        codec: &dyn StillCodec,
        sinks: &mut dyn VideoSinkFactory,
    ) -> Result<TimelapseOutput> {
        debug_assert!(Arc::ptr_eq(&reservation.flag, &self.in_flight));
        let _reservation = reservation;
        check_frame_count(frames)?;

        let created_at = chrono::Utc::now().timestamp_millis();
        let path = self
            .config
            .output_dir
            .join(timelapse_file_name(created_at, self.config.format));
        self.logger.info(&format!(
            "Assembling {} frames into {}",
            frames.len(),
            path.display()
        ));

        let mut remaining = frames.iter().enumerate();
        let mut skipped = 0usize;

        let first = remaining
            .by_ref()
            .find_map(|(index, frame)| self.decode_or_skip(index, frame, codec, &mut skipped));
        let Some(first) = first else {
            return Err(DetectionError::Decode(format!(
                "none of the {} captured frames could be decoded",
                frames.len()
            )));
        };

        let spec = VideoSinkSpec {
            path,
            width: first.width(),
            height: first.height(),
            fps: self.config.fps,
            format: self.config.format,
        };
        let mut sink = sinks.open(&spec)?;
        let mut canvas = Canvas::new(first.width(), first.height());
        let mut slot = 0u64;
        let mut next_tick = 0u64;

        next_tick = self.hold(&first, slot, next_tick, &mut canvas, sink.as_mut())?;
        slot += 1;
        for (index, frame) in remaining {
            if let Some(image) = self.decode_or_skip(index, frame, codec, &mut skipped) {
                next_tick = self.hold(&image, slot, next_tick, &mut canvas, sink.as_mut())?;
                slot += 1;
            }
        }

        let path = sink.finish()?;

        let scheduled_end = ticks_for_slot(slot - 1, self.config.hold, self.config.fps).end;
        let duration = if next_tick > scheduled_end {
            self.logger.warn(&format!(
                "Hold of {:?} is shorter than one frame at {} fps, video stretched",
                self.config.hold, self.config.fps
            ));
            Duration::from_secs(next_tick) / self.config.fps.max(1)
        } else {
            self.config.hold * slot as u32
        };
        let output = TimelapseOutput {
            path,
            format: self.config.format,
            frames_used: slot as usize,
            frames_skipped: skipped,
            encoded_frames: next_tick,
            duration,
        };
        self.logger.info(&format!(
            "Timelapse saved to {} ({} stills, {} skipped, {} encoded frames)",
            output.path.display(),
            output.frames_used,
            output.frames_skipped,
            output.encoded_frames
        ));
        Ok(output)
    }

    fn decode_or_skip(
        &self,
        index: usize,
        frame: &CapturedFrame,
        codec: &dyn StillCodec,
        skipped: &mut usize,
    ) -> Option<PixelBuffer> {
        match codec.decode(frame.encoded_image()) {
            Ok(image) if !image.is_empty() => Some(image),
            Ok(_) => {
                self.logger
                    .warn(&format!("Frame {} decoded to an empty image, skipped", index));
                *skipped += 1;
                None
            }
            Err(e) => {
                self.logger.warn(&format!("Frame {} skipped: {}", index, e));
                *skipped += 1;
                None
            }
        }
    }

    /// Draws `image` and emits it on every encoder tick of display `slot`,
    /// starting no earlier than `next_tick`. Returns the next free tick.
    fn hold(
        &self,
        image: &PixelBuffer,
        slot: u64,
        next_tick: u64,
        canvas: &mut Canvas,
        sink: &mut dyn VideoSink,
    ) -> Result<u64> {
        canvas.clear();
        canvas.draw(image);
        let rendered = canvas.to_buffer();

        let ticks = emitted_ticks(slot, self.config.hold, self.config.fps, next_tick);
        let end = ticks.end;
        for tick in ticks {
            sink.push_frame(&rendered, tick as i64)?;
        }
        Ok(end)
    }
}

fn check_frame_count(frames: &[CapturedFrame]) -> Result<()> {
    if frames.len() < MIN_TIMELAPSE_FRAMES {
        return Err(DetectionError::NotEnoughFrames {
            available: frames.len(),
            required: MIN_TIMELAPSE_FRAMES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RawCodec, RecordingSinks};
    use std::time::Instant;

    fn captured(rgba: [u8; 4]) -> CapturedFrame {
        let encoded = RawCodec.encode(&PixelBuffer::filled(4, 3, rgba)).unwrap();
        CapturedFrame::new(encoded, Instant::now(), chrono::Local::now())
    }

    fn corrupt() -> CapturedFrame {
        CapturedFrame::new(vec![1, 2, 3], Instant::now(), chrono::Local::now())
    }

    fn assembler() -> TimelapseAssembler {
        let config = TimelapseConfig {
            output_dir: PathBuf::from("/videos"),
            ..TimelapseConfig::default()
        };
        TimelapseAssembler::new(config, Logger::disabled())
    }

    #[test]
    fn test_single_frame_is_rejected_without_opening_sink() {
        let mut sinks = RecordingSinks::default();
        let err = assembler()
            .assemble(&[captured([1; 4])], &RawCodec, &mut sinks)
            .unwrap_err();

        assert_eq!(
            err,
            DetectionError::NotEnoughFrames {
                available: 1,
                required: 2
            }
        );
        assert!(sinks.log.lock().unwrap().opened.is_empty());
    }

    #[test]
    fn test_frames_are_held_in_order() {
        let mut sinks = RecordingSinks::default();
        let frames = [captured([10, 0, 0, 255]), captured([20, 0, 0, 255]), captured([30, 0, 0, 255])];

        let output = assembler().assemble(&frames, &RawCodec, &mut sinks).unwrap();

        let log = sinks.log.lock().unwrap();
        assert_eq!(log.opened.len(), 1);
        assert_eq!(log.opened[0].width, 4);
        assert_eq!(log.opened[0].height, 3);
        assert_eq!(log.opened[0].fps, 25);
        assert_eq!(log.finished, vec![output.path.clone()]);

        let reds: Vec<u8> = log.frames.iter().map(|(_, px)| px[0]).collect();
        assert_eq!(reds, vec![10, 10, 10, 20, 20, 30, 30, 30]);
        let pts: Vec<i64> = log.frames.iter().map(|(pts, _)| *pts).collect();
        assert_eq!(pts, (0..8).collect::<Vec<i64>>());

        assert_eq!(output.frames_used, 3);
        assert_eq!(output.encoded_frames, 8);
        assert_eq!(output.duration, Duration::from_millis(300));
    }

    #[test]
    fn test_output_name_and_location() {
        let mut sinks = RecordingSinks::default();
        let frames = [captured([1; 4]), captured([2; 4])];
        let output = assembler().assemble(&frames, &RawCodec, &mut sinks).unwrap();

        assert!(output.path.starts_with("/videos"));
        let name = output.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("timelapse-"));
        assert!(name.ends_with(".webm"));
        let millis = &name["timelapse-".len()..name.len() - ".webm".len()];
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_undecodable_frames_are_skipped() {
        let mut sinks = RecordingSinks::default();
        let frames = [corrupt(), captured([50, 0, 0, 255]), corrupt(), captured([60, 0, 0, 255])];

        let output = assembler().assemble(&frames, &RawCodec, &mut sinks).unwrap();

        assert_eq!(output.frames_used, 2);
        assert_eq!(output.frames_skipped, 2);
        let log = sinks.log.lock().unwrap();
        let reds: Vec<u8> = log.frames.iter().map(|(_, px)| px[0]).collect();
        assert_eq!(reds, vec![50, 50, 50, 60, 60]);
    }

    #[test]
    fn test_nothing_decodable_opens_no_sink() {
        let mut sinks = RecordingSinks::default();
        let err = assembler()
            .assemble(&[corrupt(), corrupt()], &RawCodec, &mut sinks)
            .unwrap_err();

        assert!(matches!(err, DetectionError::Decode(_)));
        assert!(sinks.log.lock().unwrap().opened.is_empty());
    }

    #[test]
    fn test_sink_failure_discards_partial_output() {
        let mut sinks = RecordingSinks {
            fail_after: Some(4),
            ..RecordingSinks::default()
        };
        let frames = [captured([1; 4]), captured([2; 4]), captured([3; 4])];
        let asm = assembler();

        let err = asm.assemble(&frames, &RawCodec, &mut sinks).unwrap_err();

        assert!(matches!(err, DetectionError::Encode(_)));
        let log = sinks.log.lock().unwrap();
        assert!(log.finished.is_empty());
        assert_eq!(log.dropped_unfinished, 1);
        assert!(!asm.is_busy());
    }

    #[test]
    fn test_concurrent_assembly_is_rejected() {
        let asm = assembler();
        let other = asm.clone();
        let frames = [captured([1; 4]), captured([2; 4])];

        let reservation = asm.try_reserve().unwrap();
        assert!(other.is_busy());
        let err = other
            .assemble(&frames, &RawCodec, &mut RecordingSinks::default())
            .unwrap_err();
        assert_eq!(err, DetectionError::AssemblyInProgress);

        drop(reservation);
        assert!(other
            .assemble(&frames, &RawCodec, &mut RecordingSinks::default())
            .is_ok());
    }

    #[test]
    fn test_second_reservation_is_refused() {
        let asm = assembler();
        let first = asm.try_reserve().unwrap();

        assert_eq!(
            asm.clone().try_reserve().unwrap_err(),
            DetectionError::AssemblyInProgress
        );
        drop(first);
        assert!(!asm.is_busy());
        assert!(asm.try_reserve().is_ok());
    }

    #[test]
    fn test_reservation_moves_to_another_thread() {
        let asm = assembler();
        let reservation = asm.try_reserve().unwrap();
        let worker = asm.clone();
        let frames = vec![captured([1; 4]), captured([2; 4])];

        let handle = std::thread::spawn(move || {
            let mut sinks = RecordingSinks::default();
            worker.assemble_reserved(reservation, &frames, &RawCodec, &mut sinks)
        });
        let output = handle.join().unwrap().unwrap();

        assert_eq!(output.frames_used, 2);
        assert!(!asm.is_busy());
    }

    #[test]
    fn test_reserved_run_still_checks_frame_count() {
        let asm = assembler();
        let reservation = asm.try_reserve().unwrap();
        let err = asm
            .assemble_reserved(
                reservation,
                &[captured([1; 4])],
                &RawCodec,
                &mut RecordingSinks::default(),
            )
            .unwrap_err();

        assert!(matches!(err, DetectionError::NotEnoughFrames { .. }));
        assert!(!asm.is_busy());
    }

    #[test]
    fn test_hold_shorter_than_a_frame_keeps_every_still() {
        let config = TimelapseConfig {
            hold: Duration::from_millis(10),
            output_dir: PathBuf::from("/videos"),
            ..TimelapseConfig::default()
        };
        let asm = TimelapseAssembler::new(config, Logger::disabled());
        let mut sinks = RecordingSinks::default();
        let frames = [captured([10, 0, 0, 255]), captured([20, 0, 0, 255]), captured([30, 0, 0, 255])];

        let output = asm.assemble(&frames, &RawCodec, &mut sinks).unwrap();

        let log = sinks.log.lock().unwrap();
        let reds: Vec<u8> = log.frames.iter().map(|(_, px)| px[0]).collect();
        assert_eq!(reds, vec![10, 20, 30]);
        let pts: Vec<i64> = log.frames.iter().map(|(pts, _)| *pts).collect();
        assert_eq!(pts, vec![0, 1, 2]);

        assert_eq!(output.frames_used, 3);
        assert_eq!(output.encoded_frames, 3);
        assert_eq!(output.duration, Duration::from_millis(120));
    }
}
