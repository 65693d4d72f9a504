//! Stitching captured stills into a video file.

mod assembler;
mod canvas;
mod format;
mod schedule;

pub use assembler::{
    MIN_TIMELAPSE_FRAMES, Reservation, TimelapseAssembler, TimelapseConfig, TimelapseOutput,
    timelapse_file_name,
};
pub use canvas::Canvas;
pub use format::VideoFormat;
pub use schedule::{emitted_ticks, ticks_for_slot};
