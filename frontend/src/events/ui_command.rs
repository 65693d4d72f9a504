/// Commands initiated by the UI (View -> Controller)
/// These are "requests" to perform actions.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Start when idle, stop when monitoring
    ToggleMonitoring,
    /// Slider moved
    SetSensitivity(u8),
    CreateTimelapse,
}
