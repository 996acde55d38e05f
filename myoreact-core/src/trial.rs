use crate::pose::GestureCode;
use serde::{Deserialize, Serialize};

/// One half of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    /// Waiting for fingers-spread.
    Spread,
    /// Waiting for a fist.
    Fist,
}

impl Leg {
    /// Legs of one trial, in the order they run.
    pub const ORDER: [Leg; 2] = [Leg::Spread, Leg::Fist];

    pub fn target(&self) -> GestureCode {
        match self {
            Leg::Spread => GestureCode::FingersSpread,
            Leg::Fist => GestureCode::Fist,
        }
    }
}

/// Recorded result per leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_index: usize,
    pub leg: Leg,
    pub elapsed_ms: u64,
}

impl TrialRecord {
    pub fn seconds(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
