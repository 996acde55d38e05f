use serde::{Deserialize, Serialize};
use std::fmt;

pub const LABEL_REST: &str = "rest";
pub const LABEL_FIST: &str = "fist";
pub const LABEL_WAVE_IN: &str = "waveIn";
pub const LABEL_WAVE_OUT: &str = "waveOut";
pub const LABEL_FINGERS_SPREAD: &str = "fingersSpread";
pub const LABEL_DOUBLE_TAP: &str = "doubleTap";
pub const LABEL_UNKNOWN: &str = "unknown";

/// Hand poses recognised by the armband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pose {
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
    DoubleTap,
    Unknown,
}

impl Pose {
    /// Human-readable name, as the device reports it.
    pub fn label(&self) -> &'static str {
        match self {
            Pose::Rest => LABEL_REST,
            Pose::Fist => LABEL_FIST,
            Pose::WaveIn => LABEL_WAVE_IN,
            Pose::WaveOut => LABEL_WAVE_OUT,
            Pose::FingersSpread => LABEL_FINGERS_SPREAD,
            Pose::DoubleTap => LABEL_DOUBLE_TAP,
            Pose::Unknown => LABEL_UNKNOWN,
        }
    }

    /// Unrecognised labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            LABEL_REST => Pose::Rest,
            LABEL_FIST => Pose::Fist,
            LABEL_WAVE_IN => Pose::WaveIn,
            LABEL_WAVE_OUT => Pose::WaveOut,
            LABEL_FINGERS_SPREAD => Pose::FingersSpread,
            LABEL_DOUBLE_TAP => Pose::DoubleTap,
            _ => Pose::Unknown,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arm {
    Left,
    Right,
    Unknown,
}

impl Arm {
    pub fn short(&self) -> &'static str {
        match self {
            Arm::Left => "L",
            Arm::Right => "R",
            Arm::Unknown => "?",
        }
    }
}

/// Which way the armband's +x axis faces once synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XDirection {
    TowardWrist,
    TowardElbow,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    Locked,
    Unlocked,
}

/// How long the armband keeps delivering poses after an unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockMode {
    /// Stay unlocked until told otherwise.
    Hold,
    /// Short window, then lock again on inactivity.
    Timed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEmg {
    Disabled,
    Enabled,
}

/// Discrete gesture derived from a snapshot. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureCode {
    None,
    Fist,
    FingersSpread,
}
