use std::time::{Duration, Instant};

/// Trait for high-precision timers
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
    fn sleep(&self, d: Duration);
    fn record_tick(&mut self, d: Duration);
    fn cadence_stats(&self) -> CadenceStats;
}

/// Statistics over recorded pump durations.
#[derive(Debug, Clone, PartialEq)]
pub struct CadenceStats {
    pub samples: usize,
    pub average_tick_ns: f64,
    pub jitter_ns: f64,
    pub min_tick_ns: f64,
    pub max_tick_ns: f64,
    pub effective_hz: f64,
}

impl CadenceStats {
    pub fn from_ticks(ticks: &[Duration]) -> Self {
        let times: Vec<f64> = ticks.iter().map(|d| d.as_nanos() as f64).collect();
        if times.is_empty() {
            return CadenceStats {
                samples: 0,
                average_tick_ns: 0.0,
                jitter_ns: 0.0,
                min_tick_ns: 0.0,
                max_tick_ns: 0.0,
                effective_hz: 0.0,
            };
        }
        let sum: f64 = times.iter().sum();
        let avg = sum / times.len() as f64;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / times.len() as f64;
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        CadenceStats {
            samples: times.len(),
            average_tick_ns: avg,
            jitter_ns: var.sqrt(),
            min_tick_ns: min,
            max_tick_ns: max,
            effective_hz: if avg > 0.0 { 1e9 / avg } else { 0.0 },
        }
    }
}

/// Bounded ring of tick durations shared by the timer implementations.
#[derive(Debug, Clone)]
pub(crate) struct TickLog {
    ticks: Vec<Duration>,
    max_samples: usize,
}

impl TickLog {
    pub(crate) fn new(max_samples: usize) -> Self {
        Self {
            ticks: Vec::with_capacity(max_samples),
            max_samples,
        }
    }

    pub(crate) fn push(&mut self, d: Duration) {
        if self.ticks.len() >= self.max_samples {
            self.ticks.remove(0);
        }
        self.ticks.push(d);
    }

    pub(crate) fn stats(&self) -> CadenceStats {
        CadenceStats::from_ticks(&self.ticks)
    }
}

/// Monotonic wall-clock timer. Timestamps are nanoseconds since creation.
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
    ticks: TickLog,
}

impl Timer for HighPrecisionTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }
    fn record_tick(&mut self, d: Duration) {
        self.ticks.push(d);
    }
    fn cadence_stats(&self) -> CadenceStats {
        self.ticks.stats()
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            ticks: TickLog::new(1000),
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        #[cfg(target_os = "linux")]
        self.linux_sleep(duration);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "linux")]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{clock_nanosleep, timespec, CLOCK_MONOTONIC};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        // Interrupted sleeps return early; callers treat the cadence as best effort.
        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}
