use crate::pose::{
    Arm, GestureCode, LABEL_FINGERS_SPREAD, LABEL_FIST, LABEL_UNKNOWN, LockState, XDirection,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMG_CHANNELS: usize = 8;

/// Most recently known armband state. Overwritten in place, no history.
///
/// `limb_side` and `x_direction` only mean something while `arm_detected`
/// is true; after an unsync they keep whatever the last sync wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    pub arm_detected: bool,
    pub limb_side: Arm,
    pub x_direction: XDirection,
    pub lock_state: LockState,
    pub raw_pose_label: String,
    pub emg_channels: [i8; EMG_CHANNELS],
}

impl Default for GestureSnapshot {
    fn default() -> Self {
        Self {
            arm_detected: false,
            limb_side: Arm::Unknown,
            x_direction: XDirection::Unknown,
            lock_state: LockState::Locked,
            raw_pose_label: LABEL_UNKNOWN.to_string(),
            emg_channels: [0; EMG_CHANNELS],
        }
    }
}

impl GestureSnapshot {
    /// Trigger gesture for the current state. `None` while no arm is synced.
    pub fn gesture(&self) -> GestureCode {
        if !self.arm_detected {
            return GestureCode::None;
        }
        match self.raw_pose_label.as_str() {
            LABEL_FIST => GestureCode::Fist,
            LABEL_FINGERS_SPREAD => GestureCode::FingersSpread,
            _ => GestureCode::None,
        }
    }

    /// Limb side, only when it is meaningful.
    pub fn synced_arm(&self) -> Option<Arm> {
        self.arm_detected.then_some(self.limb_side)
    }
}

/// One-line live view: EMG columns, then lock / arm / pose fields.
impl fmt::Display for GestureSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sample in self.emg_channels.iter() {
            write!(f, "{:<4},", sample)?;
        }

        if self.arm_detected {
            let lock = match self.lock_state {
                LockState::Unlocked => "unlocked",
                LockState::Locked => "locked",
            };
            write!(
                f,
                "[{:<8}][{}][{:<14}]",
                lock,
                self.limb_side.short(),
                self.raw_pose_label
            )
        } else {
            write!(f, "[{}][?][{}]", " ".repeat(8), " ".repeat(14))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_has_no_gesture() {
        let snapshot = GestureSnapshot::default();
        assert_eq!(snapshot.gesture(), GestureCode::None);
        assert_eq!(snapshot.synced_arm(), None);
        assert_eq!(snapshot.lock_state, LockState::Locked);
        assert_eq!(snapshot.emg_channels, [0; EMG_CHANNELS]);
    }

    #[test]
    fn test_gesture_requires_arm() {
        let mut snapshot = GestureSnapshot {
            raw_pose_label: "fist".to_string(),
            ..Default::default()
        };
        assert_eq!(snapshot.gesture(), GestureCode::None);

        snapshot.arm_detected = true;
        assert_eq!(snapshot.gesture(), GestureCode::Fist);

        snapshot.raw_pose_label = "fingersSpread".to_string();
        assert_eq!(snapshot.gesture(), GestureCode::FingersSpread);

        snapshot.raw_pose_label = "waveIn".to_string();
        assert_eq!(snapshot.gesture(), GestureCode::None);
    }

    #[test]
    fn test_status_line_when_synced() {
        let snapshot = GestureSnapshot {
            arm_detected: true,
            limb_side: Arm::Left,
            lock_state: LockState::Unlocked,
            raw_pose_label: "fist".to_string(),
            emg_channels: [1, -2, 30, -128, 0, 0, 0, 127],
            ..Default::default()
        };
        assert_eq!(
            snapshot.to_string(),
            "1   ,-2  ,30  ,-128,0   ,0   ,0   ,127 ,[unlocked][L][fist          ]"
        );
    }

    #[test]
    fn test_status_line_placeholder() {
        let snapshot = GestureSnapshot::default();
        assert_eq!(
            snapshot.to_string(),
            "0   ,0   ,0   ,0   ,0   ,0   ,0   ,0   ,[        ][?][              ]"
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&GestureSnapshot::default()).expect("serialize");
        assert!(json.contains("\"raw_pose_label\":\"unknown\""));
    }
}
