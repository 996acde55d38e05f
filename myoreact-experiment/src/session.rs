use crate::tracker::PoseStateTracker;
use myoreact_device::{Armband, DeviceError};
use myoreact_core::StreamEmg;
use std::time::Duration;

/// Anything the trial loop can pump for one bounded tick.
pub trait EventSource {
    /// Drain events that arrive within `budget` into `tracker`.
    /// Returns how many events were applied.
    fn pump(&mut self, tracker: &mut PoseStateTracker, budget: Duration)
    -> Result<usize, DeviceError>;
}

/// Bridges an armband to the tracker: events go in, the tracker's unlock and
/// haptic requests go back out to the same armband.
pub struct DeviceSession<A: Armband> {
    armband: A,
}

impl<A: Armband> DeviceSession<A> {
    /// Take ownership of a found armband and turn on EMG streaming.
    pub fn open(mut armband: A) -> Result<Self, DeviceError> {
        armband.set_stream_emg(StreamEmg::Enabled)?;
        Ok(Self { armband })
    }

    pub fn armband(&self) -> &A {
        &self.armband
    }

    pub fn into_inner(self) -> A {
        self.armband
    }
}

impl<A: Armband> EventSource for DeviceSession<A> {
    fn pump(
        &mut self,
        tracker: &mut PoseStateTracker,
        budget: Duration,
    ) -> Result<usize, DeviceError> {
        let events = self.armband.pump_events(budget)?;
        for event in events.iter() {
            for command in tracker.apply(event) {
                self.armband.send(command)?;
            }
        }
        Ok(events.len())
    }
}
