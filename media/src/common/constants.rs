//! Common constants shared across media modules

/// Logging intervals for frame processing
pub mod logging {
    /// Log progress every N frames (camera capture)
    pub const CAMERA_LOG_INTERVAL: u64 = 1000;
    /// Log progress every N frames (timelapse encoder)
    pub const ENCODER_LOG_INTERVAL: u64 = 50;
}

/// Still image settings
pub mod still {
    /// File extension handed to `imencode`
    pub const JPEG_EXTENSION: &str = ".jpg";
    /// Maximum JPEG quality
    pub const JPEG_QUALITY: i32 = 100;
}

/// Timelapse encoder settings
pub mod encoder {
    /// Target bitrate in bits per second
    pub const DEFAULT_BITRATE: usize = 2_000_000;
}

