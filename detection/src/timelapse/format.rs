use std::fmt;
use std::str::FromStr;

/// Codec and container of the produced timelapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VideoFormat {
    /// VP8 in WebM.
    #[default]
    Vp8,
    /// VP9 in WebM.
    Vp9,
    /// H.264 in MP4.
    H264,
}

impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Vp8 | VideoFormat::Vp9 => "webm",
            VideoFormat::H264 => "mp4",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            VideoFormat::Vp8 => "video/webm; codecs=vp8",
            VideoFormat::Vp9 => "video/webm; codecs=vp9",
            VideoFormat::H264 => "video/mp4; codecs=avc1",
        }
    }

    pub fn codec_name(&self) -> &'static str {
        match self {
            VideoFormat::Vp8 => "VP8",
            VideoFormat::Vp9 => "VP9",
            VideoFormat::H264 => "H264",
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec_name())
    }
}

impl FromStr for VideoFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vp8" => Ok(VideoFormat::Vp8),
            "vp9" => Ok(VideoFormat::Vp9),
            "h264" | "avc" => Ok(VideoFormat::H264),
            other => Err(format!("unsupported codec '{}' (vp8, vp9, h264)", other)),
        }
    }
}
