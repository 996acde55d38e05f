use serde::{Deserialize, Serialize};

/// Phases of a reaction-time run, in the order they are entered.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first fist. Nothing is timed.
    Arming,
    /// Timing spread / fist legs.
    Measuring,
    /// Terminal: results are printed.
    Reporting,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Arming
    }
}

impl Phase {
    pub fn next(&self) -> Option<Self> {
        use Phase::*;
        Some(match self {
            Arming => Measuring,
            Measuring => Reporting,
            Reporting => return None,
        })
    }

    pub fn is_arming(&self) -> bool {
        matches!(self, Phase::Arming)
    }

    pub fn is_measuring(&self) -> bool {
        matches!(self, Phase::Measuring)
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}
