//! Application Module - MVU Controller
//!
//! This module implements the Controller layer of the MVU architecture.
//! It coordinates between the view layer (pages) and the background logic thread.
//!
//! # Structure
//!
//! - `state.rs`: Application state definition and MVU loop
//! - `ui_handler.rs`: Command dispatcher for UI actions
//! - `logic_handler.rs`: Processes events from background thread
//!
//! # Communication Flow
//!
//! ```text
//! View (pages) --> UiCommand --> ui_handler --> State mutation
//!                                          \--> LogicCommand --> Logic thread
//!
//! Logic thread --> LogicEvent --> logic_handler --> State update (status, preview, toasts)
//! ```

mod logic_handler;
mod state;
mod ui_handler;

pub use state::App;
