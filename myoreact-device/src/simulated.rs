use crate::error::DeviceError;
use crate::hub::{Armband, Hub};
use myoreact_core::{
    Arm, DeviceEvent, EMG_CHANNELS, Pose, StreamEmg, UnlockMode, XDirection,
};
use myoreact_timing::Timer;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Reaction latency of the synthetic participant, in milliseconds.
pub const REACTION_RANGE_MS: (u64, u64) = (250, 900);
/// How long the participant relaxes between active poses.
pub const REST_RANGE_MS: (u64, u64) = (80, 200);

/// Hub that "finds" a synthetic armband after a fixed delay.
pub struct SimulatedHub<T: Timer<Timestamp = u64>, R: Rng> {
    pub timer: T,
    pub rng: Option<R>,
    pub discovery_delay: Duration,
}

impl<T: Timer<Timestamp = u64>, R: Rng> SimulatedHub<T, R> {
    pub fn new(timer: T, rng: R) -> Self {
        Self {
            timer,
            rng: Some(rng),
            discovery_delay: Duration::from_millis(300),
        }
    }
}

impl<T: Timer<Timestamp = u64>, R: Rng> Hub for SimulatedHub<T, R> {
    type Device = SimulatedArmband<T, R>;

    fn wait_for_device(&mut self, timeout: Duration) -> Result<Option<Self::Device>, DeviceError> {
        if self.discovery_delay > timeout {
            self.timer.sleep(timeout);
            return Ok(None);
        }
        self.timer.sleep(self.discovery_delay);
        // Only one armband per hub.
        Ok(self
            .rng
            .take()
            .map(|rng| SimulatedArmband::new(self.timer.clone(), rng)))
    }
}

/// An armband worn by a participant who alternates fist and fingers-spread,
/// relaxing in between, with random latencies.
pub struct SimulatedArmband<T: Timer<Timestamp = u64>, R: Rng> {
    timer: T,
    rng: R,
    stream_emg: StreamEmg,
    synced: bool,
    next_pose: Pose,
    next_at_ns: u64,
    last_active: Pose,
}

impl<T: Timer<Timestamp = u64>, R: Rng> SimulatedArmband<T, R> {
    pub fn new(timer: T, mut rng: R) -> Self {
        let next_at_ns = timer.now() + random_ns(&mut rng, REACTION_RANGE_MS);
        Self {
            timer,
            rng,
            stream_emg: StreamEmg::Disabled,
            synced: false,
            next_pose: Pose::Fist,
            next_at_ns,
            last_active: Pose::FingersSpread,
        }
    }

    /// Schedule the pose after `current`.
    fn advance_script(&mut self, current: Pose) {
        let (next, range) = match current {
            Pose::Rest => {
                let next = if self.last_active == Pose::Fist {
                    Pose::FingersSpread
                } else {
                    Pose::Fist
                };
                (next, REACTION_RANGE_MS)
            }
            active => {
                self.last_active = active;
                (Pose::Rest, REST_RANGE_MS)
            }
        };
        self.next_pose = next;
        self.next_at_ns += random_ns(&mut self.rng, range);
    }
}

fn random_ns<R: Rng>(rng: &mut R, range_ms: (u64, u64)) -> u64 {
    rng.random_range(range_ms.0..=range_ms.1) * 1_000_000
}

impl<T: Timer<Timestamp = u64>, R: Rng> Armband for SimulatedArmband<T, R> {
    fn set_stream_emg(&mut self, mode: StreamEmg) -> Result<(), DeviceError> {
        self.stream_emg = mode;
        Ok(())
    }

    fn pump_events(&mut self, budget: Duration) -> Result<Vec<DeviceEvent>, DeviceError> {
        self.timer.sleep(budget);
        let now = self.timer.now();
        let timestamp = now / 1_000;
        let mut events = Vec::new();

        if !self.synced {
            self.synced = true;
            events.push(DeviceEvent::ArmSync {
                timestamp,
                arm: Arm::Right,
                x_direction: XDirection::TowardWrist,
            });
        }

        while self.next_at_ns <= now {
            let pose = self.next_pose;
            events.push(DeviceEvent::Pose {
                timestamp: self.next_at_ns / 1_000,
                pose,
            });
            self.advance_script(pose);
        }

        if self.stream_emg == StreamEmg::Enabled {
            let mut samples = [0i8; EMG_CHANNELS];
            for sample in samples.iter_mut() {
                *sample = self.rng.random_range(-20..=20);
            }
            events.push(DeviceEvent::Emg { timestamp, samples });
        }

        Ok(events)
    }

    fn unlock(&mut self, mode: UnlockMode) -> Result<(), DeviceError> {
        debug!(?mode, "simulated unlock");
        Ok(())
    }

    fn notify_user_action(&mut self) -> Result<(), DeviceError> {
        debug!("simulated vibration");
        Ok(())
    }
}
