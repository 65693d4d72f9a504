//! Audio output for the alarm.

pub mod tone;

pub use tone::{CpalTone, CpalToneFactory};
