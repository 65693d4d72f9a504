/// Flags shown to the user.
///
/// Both detection flags are false whenever `is_active` is false; only
/// [`MonitorSession`](crate::MonitorSession) mutates this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionState {
    pub is_active: bool,
    pub motion_detected: bool,
    pub fire_detected: bool,
}

impl DetectionState {
    pub fn any_detection(&self) -> bool {
        self.motion_detected || self.fire_detected
    }
}
