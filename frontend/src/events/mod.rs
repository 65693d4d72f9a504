//! Messages exchanged between the view, the controller and the logic
//! thread.

mod logic_command;
mod logic_event;
mod ui_command;

pub use logic_command::LogicCommand;
pub use logic_event::{LogicEvent, MonitorStatus};
pub use ui_command::UiCommand;
