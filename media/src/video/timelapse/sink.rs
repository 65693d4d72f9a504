//! Encodes RGBA frames to VP8/VP9/H.264 and muxes them into a file.

use crate::common::constants::encoder::DEFAULT_BITRATE;
use crate::common::constants::logging::ENCODER_LOG_INTERVAL;
use crate::error::{MediaError, Result};
use detection::{PixelBuffer, VideoFormat, VideoSink, VideoSinkFactory, VideoSinkSpec};
use ffmpeg_next as ffmpeg;
use logging::Logger;
use std::fs;
use std::path::PathBuf;

const RGBA_BYTES: usize = 4;

/// FFmpeg encoder for each output format.
pub fn codec_id(format: VideoFormat) -> ffmpeg::codec::Id {
    match format {
        VideoFormat::Vp8 => ffmpeg::codec::Id::VP8,
        VideoFormat::Vp9 => ffmpeg::codec::Id::VP9,
        VideoFormat::H264 => ffmpeg::codec::Id::H264,
    }
}

/// YUV 4:2:0 needs even dimensions; odd sizes are scaled down by one pixel.
fn even_dimension(value: u32) -> u32 {
    (value & !1).max(2)
}

/// Opens [`FfmpegVideoSink`]s.
#[derive(Clone)]
pub struct FfmpegSinkFactory {
    bit_rate: usize,
    logger: Logger,
}

impl FfmpegSinkFactory {
    pub fn new(logger: Logger) -> Self {
        Self {
            bit_rate: DEFAULT_BITRATE,
            logger,
        }
    }

    pub fn with_bit_rate(mut self, bit_rate: usize) -> Self {
        self.bit_rate = bit_rate;
        self
    }
}

impl VideoSinkFactory for FfmpegSinkFactory {
    fn open(&mut self, spec: &VideoSinkSpec) -> detection::Result<Box<dyn VideoSink>> {
        let sink = FfmpegVideoSink::create(spec, self.bit_rate, self.logger.clone())?;
        Ok(Box::new(sink))
    }
}

/// An output file with one video stream.
///
/// Frames arrive as RGBA, are scaled into YUV420P and encoded with the
/// presentation timestamp the caller assigns. The file is deleted if the
/// sink is dropped before [`VideoSink::finish`].
pub struct FfmpegVideoSink {
    output: Option<ffmpeg::format::context::Output>,
    encoder: ffmpeg::encoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    stream_index: usize,
    encoder_time_base: ffmpeg::Rational,
    stream_time_base: ffmpeg::Rational,
    width: u32,
    height: u32,
    path: PathBuf,
    frame_count: u64,
    logger: Logger,
}

impl FfmpegVideoSink {
    pub fn create(spec: &VideoSinkSpec, bit_rate: usize, logger: Logger) -> Result<Self> {
        if spec.width == 0 || spec.height == 0 || spec.fps == 0 {
            return Err(MediaError::Config(format!(
                "Invalid video geometry {}x{} @ {} fps",
                spec.width, spec.height, spec.fps
            )));
        }

        ffmpeg::init().map_err(|e| MediaError::Codec(format!("Error init ffmpeg: {}", e)))?;

        let enc_width = even_dimension(spec.width);
        let enc_height = even_dimension(spec.height);
        logger.info(&format!(
            "Opening {} encoder: {}x{} @ {} fps -> {}",
            spec.format,
            enc_width,
            enc_height,
            spec.fps,
            spec.path.display()
        ));

        let mut output = ffmpeg::format::output(&spec.path)?;
        let global_header = output
            .format()
            .flags()
            .contains(ffmpeg::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg::encoder::find(codec_id(spec.format))
            .ok_or_else(|| MediaError::Codec(format!("{} encoder not found", spec.format)))?;

        let stream_index = {
            let stream = output.add_stream(codec)?;
            stream.index()
        };

        let mut encoder = ffmpeg::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| MediaError::Codec(format!("Error creating context: {}", e)))?;

        let encoder_time_base = ffmpeg::Rational::new(1, spec.fps as i32);
        encoder.set_width(enc_width);
        encoder.set_height(enc_height);
        encoder.set_format(ffmpeg::format::Pixel::YUV420P);
        encoder.set_bit_rate(bit_rate);
        encoder.set_time_base(encoder_time_base);
        encoder.set_frame_rate(Some((spec.fps as i32, 1)));
        encoder.set_gop(spec.fps);
        if global_header {
            encoder.set_flags(ffmpeg::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder
            .open_as(codec)
            .map_err(|e| MediaError::Codec(format!("Error opening encoder: {}", e)))?;

        if let Some(mut stream) = output.stream_mut(stream_index) {
            stream.set_parameters(&encoder);
            stream.set_time_base(encoder_time_base);
        }

        output.write_header()?;
        let stream_time_base = output
            .stream(stream_index)
            .map(|s| s.time_base())
            .unwrap_or(encoder_time_base);

        let scaler = ffmpeg::software::scaling::Context::get(
            ffmpeg::format::Pixel::RGBA,
            spec.width,
            spec.height,
            ffmpeg::format::Pixel::YUV420P,
            enc_width,
            enc_height,
            ffmpeg::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| MediaError::Codec(format!("Error creating scaler: {}", e)))?;

        Ok(Self {
            output: Some(output),
            encoder,
            scaler,
            stream_index,
            encoder_time_base,
            stream_time_base,
            width: spec.width,
            height: spec.height,
            path: spec.path.clone(),
            frame_count: 0,
            logger,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Copies RGBA rows into an FFmpeg frame, honouring its line stride.
    fn rgba_frame(&self, buffer: &PixelBuffer) -> Result<ffmpeg::frame::Video> {
        if buffer.width() != self.width || buffer.height() != self.height {
            return Err(MediaError::Codec(format!(
                "Frame is {}x{}, sink expects {}x{}",
                buffer.width(),
                buffer.height(),
                self.width,
                self.height
            )));
        }

        let mut frame =
            ffmpeg::frame::Video::new(ffmpeg::format::Pixel::RGBA, self.width, self.height);
        let stride = frame.stride(0);
        let row_bytes = self.width as usize * RGBA_BYTES;
        let src = buffer.data();
        let dst = frame.data_mut(0);

        for (row, chunk) in src.chunks_exact(row_bytes).enumerate() {
            let start = row * stride;
            dst[start..start + row_bytes].copy_from_slice(chunk);
        }
        Ok(frame)
    }

    /// Moves every packet the encoder has ready into the container.
    fn drain_packets(&mut self) -> Result<()> {
        let Some(output) = self.output.as_mut() else {
            return Err(MediaError::Codec("Sink already closed".to_string()));
        };

        let mut packet = ffmpeg::Packet::empty();
        while self.encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(self.stream_index);
            packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
            packet.write_interleaved(output)?;
        }
        Ok(())
    }

    fn encode(&mut self, buffer: &PixelBuffer, pts: i64) -> Result<()> {
        let rgba = self.rgba_frame(buffer)?;
        let mut yuv = ffmpeg::frame::Video::empty();
        self.scaler
            .run(&rgba, &mut yuv)
            .map_err(|e| MediaError::Codec(format!("Error scaling frame: {}", e)))?;
        yuv.set_pts(Some(pts));

        self.encoder
            .send_frame(&yuv)
            .map_err(|e| MediaError::Codec(format!("Error sending frame: {}", e)))?;
        self.drain_packets()?;

        self.frame_count += 1;
        if self.frame_count.is_multiple_of(ENCODER_LOG_INTERVAL) {
            self.logger
                .debug(&format!("Encoded {} timelapse frames", self.frame_count));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<PathBuf> {
        self.encoder
            .send_eof()
            .map_err(|e| MediaError::Codec(format!("Error flushing encoder: {}", e)))?;
        self.drain_packets()?;

        let Some(mut output) = self.output.take() else {
            return Err(MediaError::Codec("Sink already closed".to_string()));
        };
        output.write_trailer()?;
        drop(output);

        self.logger.info(&format!(
            "Wrote {} frames to {}",
            self.frame_count,
            self.path.display()
        ));
        Ok(self.path.clone())
    }
}

impl VideoSink for FfmpegVideoSink {
    fn push_frame(&mut self, frame: &PixelBuffer, pts: i64) -> detection::Result<()> {
        Ok(self.encode(frame, pts)?)
    }

    fn finish(mut self: Box<Self>) -> detection::Result<PathBuf> {
        Ok(self.close()?)
    }
}

impl Drop for FfmpegVideoSink {
    fn drop(&mut self) {
        // Still holding the muxer means finish() never completed.
        if let Some(output) = self.output.take() {
            drop(output);
            match fs::remove_file(&self.path) {
                Ok(()) => self.logger.warn(&format!(
                    "Discarded unfinished video {}",
                    self.path.display()
                )),
                Err(e) => self.logger.error(&format!(
                    "Could not remove unfinished video {}: {}",
                    self.path.display(),
                    e
                )),
            }
        }
    }
}
