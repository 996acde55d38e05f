use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Each trial is one spread leg and one fist leg.
    pub trial_count: usize,
    pub tick_interval_ms: u64,
    pub discovery_timeout_ms: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: 3,
            tick_interval_ms: 1000 / 20,
            discovery_timeout_ms: 10_000,
        }
    }
}

impl ExperimentConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn expected_records(&self) -> usize {
        self.trial_count * 2
    }
}
