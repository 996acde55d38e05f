use crate::pose::{Arm, Pose, UnlockMode, XDirection};
use crate::snapshot::EMG_CHANNELS;
use serde::{Deserialize, Serialize};

/// Events delivered by the armband while it is pumped.
///
/// `timestamp` is the device clock in microseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEvent {
    Paired {
        timestamp: u64,
    },
    Unpaired {
        timestamp: u64,
    },
    Connected {
        timestamp: u64,
    },
    Disconnected {
        timestamp: u64,
    },
    ArmSync {
        timestamp: u64,
        arm: Arm,
        x_direction: XDirection,
    },
    ArmUnsync {
        timestamp: u64,
    },
    Unlocked {
        timestamp: u64,
    },
    Locked {
        timestamp: u64,
    },
    Pose {
        timestamp: u64,
        pose: Pose,
    },
    Emg {
        timestamp: u64,
        samples: [i8; EMG_CHANNELS],
    },
}

impl DeviceEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            DeviceEvent::Paired { timestamp }
            | DeviceEvent::Unpaired { timestamp }
            | DeviceEvent::Connected { timestamp }
            | DeviceEvent::Disconnected { timestamp }
            | DeviceEvent::ArmSync { timestamp, .. }
            | DeviceEvent::ArmUnsync { timestamp }
            | DeviceEvent::Unlocked { timestamp }
            | DeviceEvent::Locked { timestamp }
            | DeviceEvent::Pose { timestamp, .. }
            | DeviceEvent::Emg { timestamp, .. } => *timestamp,
        }
    }
}

/// Requests sent back to the armband in response to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCommand {
    Unlock(UnlockMode),
    /// Haptic acknowledgement.
    NotifyUserAction,
}
