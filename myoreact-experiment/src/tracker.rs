use myoreact_core::pose::{LABEL_REST, LABEL_UNKNOWN};
use myoreact_core::{
    Arm, DeviceCommand, DeviceEvent, EMG_CHANNELS, GestureCode, GestureSnapshot, LockState,
    UnlockMode, XDirection,
};
use tracing::{debug, info, warn};

/// Keeps the single current [`GestureSnapshot`] up to date from device events.
///
/// Every operation is total. Pose updates answer with the commands the
/// armband should receive: hold it unlocked (and buzz) while a gesture is
/// held, otherwise only a timed unlock so it relocks when idle.
#[derive(Debug, Default, Clone)]
pub struct PoseStateTracker {
    snapshot: GestureSnapshot,
}

impl PoseStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &GestureSnapshot {
        &self.snapshot
    }

    /// Route one device event to the matching update.
    pub fn apply(&mut self, event: &DeviceEvent) -> Vec<DeviceCommand> {
        match event {
            DeviceEvent::Pose { timestamp, pose } => {
                return self.on_pose_event(pose.label(), *timestamp);
            }
            DeviceEvent::Emg { timestamp, samples } => self.on_emg_event(samples, *timestamp),
            DeviceEvent::ArmSync {
                timestamp,
                arm,
                x_direction,
            } => {
                self.on_arm_sync(*arm, *timestamp);
                self.snapshot.x_direction = *x_direction;
            }
            DeviceEvent::ArmUnsync { timestamp } => self.on_arm_unsync(*timestamp),
            DeviceEvent::Unlocked { timestamp } => {
                self.on_lock_changed(LockState::Unlocked, *timestamp)
            }
            DeviceEvent::Locked { timestamp } => self.on_lock_changed(LockState::Locked, *timestamp),
            DeviceEvent::Unpaired { timestamp } => self.on_unpair(*timestamp),
            DeviceEvent::Paired { timestamp } => debug!(timestamp, "paired"),
            DeviceEvent::Connected { timestamp } => debug!(timestamp, "connected"),
            DeviceEvent::Disconnected { timestamp } => {
                warn!(timestamp, "armband disconnected");
            }
        }
        Vec::new()
    }

    pub fn on_pose_event(&mut self, label: &str, timestamp: u64) -> Vec<DeviceCommand> {
        debug!(timestamp, pose = label, "pose");
        self.snapshot.raw_pose_label.clear();
        self.snapshot.raw_pose_label.push_str(label);

        if label != LABEL_REST && label != LABEL_UNKNOWN {
            vec![
                DeviceCommand::Unlock(UnlockMode::Hold),
                DeviceCommand::NotifyUserAction,
            ]
        } else {
            vec![DeviceCommand::Unlock(UnlockMode::Timed)]
        }
    }

    pub fn on_emg_event(&mut self, channels: &[i8; EMG_CHANNELS], _timestamp: u64) {
        self.snapshot.emg_channels = *channels;
    }

    pub fn on_arm_sync(&mut self, side: Arm, timestamp: u64) {
        info!(timestamp, arm = ?side, "arm synced");
        self.snapshot.arm_detected = true;
        self.snapshot.limb_side = side;
    }

    pub fn on_arm_unsync(&mut self, timestamp: u64) {
        info!(timestamp, "arm unsynced");
        self.snapshot.arm_detected = false;
    }

    pub fn on_lock_changed(&mut self, state: LockState, timestamp: u64) {
        debug!(timestamp, ?state, "lock state");
        self.snapshot.lock_state = state;
    }

    /// Only the EMG readings are cleared; pose, arm and lock fields keep
    /// their last values.
    pub fn on_unpair(&mut self, timestamp: u64) {
        warn!(timestamp, "armband unpaired");
        self.snapshot.emg_channels = [0; EMG_CHANNELS];
    }

    pub fn query_gesture(&self) -> GestureCode {
        self.snapshot.gesture()
    }

    pub fn x_direction(&self) -> XDirection {
        self.snapshot.x_direction
    }
}
