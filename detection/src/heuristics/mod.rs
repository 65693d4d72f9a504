//! Per-frame classifiers.
//!
//! Both heuristics are pure functions over [`PixelBuffer`](crate::PixelBuffer)
//! values; their thresholds live in small `Copy` config structs whose
//! defaults reproduce the tuned values.

pub mod fire;
pub mod motion;

pub use fire::{FireConfig, detect_fire, fire_ratio};
pub use motion::{MotionConfig, Sensitivity, changed_ratio, detect_motion, motion_threshold_percent};
