use chrono::{DateTime, Local};
use detection::{DetectionState, TimelapseOutput};

/// Snapshot of the session published after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonitorStatus {
    pub state: DetectionState,
    pub captured_frames: usize,
    pub last_capture: Option<DateTime<Local>>,
    pub alarm_sounding: bool,
}

/// Events sent from the Logic thread back to the UI thread
pub enum LogicEvent {
    MonitoringStarted,
    MonitoringStopped,
    /// Camera could not be acquired; the session stays idle
    MonitoringFailed(String),

    Status(MonitorStatus),
    /// Last sampled frame, ready for a texture
    Preview(egui::ColorImage),

    FireDetected,
    FireCleared,

    TimelapseStarted { frames: usize },
    TimelapseReady(TimelapseOutput),
    /// Request refused before any work (too few frames, already running)
    TimelapseRejected(String),
    TimelapseFailed(String),
}

impl std::fmt::Debug for LogicEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicEvent::Preview(image) => write!(f, "Preview({}x{})", image.size[0], image.size[1]),
            LogicEvent::MonitoringStarted => write!(f, "MonitoringStarted"),
            LogicEvent::MonitoringStopped => write!(f, "MonitoringStopped"),
            LogicEvent::MonitoringFailed(msg) => write!(f, "MonitoringFailed({})", msg),
            LogicEvent::Status(status) => write!(f, "Status({:?})", status),
            LogicEvent::FireDetected => write!(f, "FireDetected"),
            LogicEvent::FireCleared => write!(f, "FireCleared"),
            LogicEvent::TimelapseStarted { frames } => {
                write!(f, "TimelapseStarted {{ frames: {} }}", frames)
            }
            LogicEvent::TimelapseReady(output) => write!(f, "TimelapseReady({:?})", output.path),
            LogicEvent::TimelapseRejected(msg) => write!(f, "TimelapseRejected({})", msg),
            LogicEvent::TimelapseFailed(msg) => write!(f, "TimelapseFailed({})", msg),
        }
    }
}
