//! Monitor UI Components
//!
//! Each component is in its own file for better organization.

mod controls;
mod header;
mod preview;
mod status_panel;

pub use controls::render_controls;
pub use header::render_header;
pub use preview::render_preview;
pub use status_panel::render_status_panel;
