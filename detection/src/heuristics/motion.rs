use crate::pixel_buffer::PixelBuffer;
use std::fmt;

/// Motion sensitivity in `[0, 100]`; higher means smaller changes count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MIN: Sensitivity = Sensitivity(0);
    pub const MAX: Sensitivity = Sensitivity(100);

    /// Clamps into `[0, 100]`.
    pub fn new(value: i64) -> Self {
        Sensitivity(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity(50)
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frame-differencing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// A pixel changed when `|dR| + |dG| + |dB|` is strictly above this.
    pub pixel_diff_threshold: u32,
    /// `(100 - sensitivity) / divisor` gives the changed-pixel percentage
    /// that must be exceeded.
    pub divisor: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pixel_diff_threshold: 100,
            divisor: 3.0,
        }
    }
}

/// Percentage of changed pixels that must be exceeded to report motion.
pub fn motion_threshold_percent(sensitivity: Sensitivity, config: &MotionConfig) -> f64 {
    (100 - sensitivity.value()) as f64 / config.divisor
}

#[inline]
fn channel_difference(a: &[u8], b: &[u8]) -> u32 {
    a[0].abs_diff(b[0]) as u32 + a[1].abs_diff(b[1]) as u32 + a[2].abs_diff(b[2]) as u32
}

/// Fraction of pixels that changed between two frames.
///
/// `None` when the dimensions differ (the camera switched resolution).
pub fn changed_ratio(
    current: &PixelBuffer,
    previous: &PixelBuffer,
    config: &MotionConfig,
) -> Option<f64> {
    if !current.same_dimensions(previous) {
        return None;
    }
    let total = current.pixel_count();
    if total == 0 {
        return Some(0.0);
    }

    let changed = current
        .pixels()
        .zip(previous.pixels())
        .filter(|(a, b)| channel_difference(a, b) > config.pixel_diff_threshold)
        .count();
    Some(changed as f64 / total as f64)
}

/// Reports motion between `previous` and `current`.
///
/// No previous frame, or a size mismatch, means no motion.
pub fn detect_motion(
    current: &PixelBuffer,
    previous: Option<&PixelBuffer>,
    sensitivity: Sensitivity,
    config: &MotionConfig,
) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    match changed_ratio(current, previous, config) {
        Some(ratio) => ratio * 100.0 > motion_threshold_percent(sensitivity, config),
        None => false,
    }
}
