use detection::Sensitivity;

/// Logic commands sent from UI thread to Logic thread
/// The camera, alarm and captured frames live in the logic thread only.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicCommand {
    /// Acquire the camera and begin ticking
    StartMonitoring,

    /// Release the camera, silence the alarm and drop captured frames
    StopMonitoring,

    /// Takes effect on the next tick
    SetSensitivity(Sensitivity),

    /// Assemble the frames captured so far on a worker thread
    CreateTimelapse,

    /// Stop everything and leave the loop
    Shutdown,
}
