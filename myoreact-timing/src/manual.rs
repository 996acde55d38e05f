use crate::timer::{CadenceStats, TickLog, Timer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Virtual clock that only moves when told to.
///
/// Clones share the same clock, so a scripted device and the code under test
/// can agree on "now". `sleep` advances the clock instead of blocking.
#[derive(Debug, Clone)]
pub struct ManualTimer {
    now_ns: Arc<AtomicU64>,
    ticks: TickLog,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self {
            now_ns: Arc::new(AtomicU64::new(0)),
            ticks: TickLog::new(1000),
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now_ns.fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for ManualTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
    fn record_tick(&mut self, d: Duration) {
        self.ticks.push(d);
    }
    fn cadence_stats(&self) -> CadenceStats {
        self.ticks.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_clock() {
        let timer = ManualTimer::new();
        let device_side = timer.clone();

        let start = timer.now();
        device_side.advance(Duration::from_millis(50));
        device_side.sleep(Duration::from_millis(25));

        assert_eq!(timer.elapsed(start), Duration::from_millis(75));
    }
}
