use crate::error::DeviceError;
use crate::hub::{Armband, Hub};
use myoreact_core::{DeviceCommand, DeviceEvent, StreamEmg, UnlockMode};
use myoreact_timing::{ManualTimer, Timer};
use std::collections::VecDeque;
use std::time::Duration;

/// Events that arrive `arrives_after` into the pumping that reaches them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub arrives_after: Duration,
    pub events: Vec<DeviceEvent>,
}

impl ScriptStep {
    pub fn after(arrives_after: Duration, events: Vec<DeviceEvent>) -> Self {
        Self {
            arrives_after,
            events,
        }
    }

    pub fn immediate(events: Vec<DeviceEvent>) -> Self {
        Self::after(Duration::ZERO, events)
    }

    pub fn idle(duration: Duration) -> Self {
        Self::after(duration, Vec::new())
    }
}

/// Deterministic armband driven by a list of steps and a shared virtual clock.
///
/// A pump delivers the front step if it arrives within the budget, advancing
/// the clock only as far as its arrival. Otherwise the whole budget elapses
/// with nothing delivered. Once the script is spent every pump is idle.
#[derive(Debug)]
pub struct ScriptedArmband {
    clock: ManualTimer,
    steps: VecDeque<ScriptStep>,
    sent: Vec<DeviceCommand>,
    stream_emg: StreamEmg,
    pumps: usize,
    halt_after: Option<usize>,
}

impl ScriptedArmband {
    pub fn new(clock: ManualTimer, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            clock,
            steps: steps.into_iter().collect(),
            sent: Vec::new(),
            stream_emg: StreamEmg::Disabled,
            pumps: 0,
            halt_after: None,
        }
    }

    /// Report a disconnect on the pump after `pumps` have completed.
    pub fn halt_after(mut self, pumps: usize) -> Self {
        self.halt_after = Some(pumps);
        self
    }

    pub fn push_step(&mut self, step: ScriptStep) {
        self.steps.push_back(step);
    }

    pub fn pumps(&self) -> usize {
        self.pumps
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn sent_commands(&self) -> &[DeviceCommand] {
        &self.sent
    }

    pub fn stream_emg(&self) -> StreamEmg {
        self.stream_emg
    }
}

impl Armband for ScriptedArmband {
    fn set_stream_emg(&mut self, mode: StreamEmg) -> Result<(), DeviceError> {
        self.stream_emg = mode;
        Ok(())
    }

    fn pump_events(&mut self, budget: Duration) -> Result<Vec<DeviceEvent>, DeviceError> {
        if self.halt_after.is_some_and(|limit| self.pumps >= limit) {
            return Err(DeviceError::Disconnected);
        }
        self.pumps += 1;

        let Some(front) = self.steps.front_mut() else {
            self.clock.advance(budget);
            return Ok(Vec::new());
        };
        if front.arrives_after <= budget {
            self.clock.advance(front.arrives_after);
            let step = self.steps.pop_front().map(|s| s.events).unwrap_or_default();
            Ok(step)
        } else {
            self.clock.advance(budget);
            front.arrives_after -= budget;
            Ok(Vec::new())
        }
    }

    fn unlock(&mut self, mode: UnlockMode) -> Result<(), DeviceError> {
        self.sent.push(DeviceCommand::Unlock(mode));
        Ok(())
    }

    fn notify_user_action(&mut self) -> Result<(), DeviceError> {
        self.sent.push(DeviceCommand::NotifyUserAction);
        Ok(())
    }
}

/// Hub that hands out a prepared armband, or finds nothing.
#[derive(Debug)]
pub struct ScriptedHub {
    clock: ManualTimer,
    device: Option<ScriptedArmband>,
}

impl ScriptedHub {
    pub fn found(clock: ManualTimer, device: ScriptedArmband) -> Self {
        Self {
            clock,
            device: Some(device),
        }
    }

    pub fn empty(clock: ManualTimer) -> Self {
        Self {
            clock,
            device: None,
        }
    }
}

impl Hub for ScriptedHub {
    type Device = ScriptedArmband;

    fn wait_for_device(&mut self, timeout: Duration) -> Result<Option<ScriptedArmband>, DeviceError> {
        let device = self.device.take();
        if device.is_none() {
            self.clock.sleep(timeout);
        }
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myoreact_core::Pose;

    const TICK: Duration = Duration::from_millis(50);

    fn pose(pose: Pose) -> DeviceEvent {
        DeviceEvent::Pose { timestamp: 0, pose }
    }

    #[test]
    fn test_step_arrival_advances_clock() {
        let clock = ManualTimer::new();
        let mut armband = ScriptedArmband::new(
            clock.clone(),
            [
                ScriptStep::after(Duration::from_millis(120), vec![pose(Pose::Fist)]),
                ScriptStep::immediate(vec![pose(Pose::Rest)]),
            ],
        );

        assert!(armband.pump_events(TICK).expect("scripted").is_empty());
        assert!(armband.pump_events(TICK).expect("scripted").is_empty());
        assert_eq!(clock.now(), 100_000_000);

        let events = armband.pump_events(TICK).expect("scripted");
        assert_eq!(events, vec![pose(Pose::Fist)]);
        assert_eq!(clock.now(), 120_000_000);

        let events = armband.pump_events(TICK).expect("scripted");
        assert_eq!(events, vec![pose(Pose::Rest)]);
        assert_eq!(clock.now(), 120_000_000);

        assert!(armband.pump_events(TICK).expect("scripted").is_empty());
        assert_eq!(clock.now(), 170_000_000);
        assert_eq!(armband.pumps(), 5);
    }

    #[test]
    fn test_halt_after() {
        let mut armband = ScriptedArmband::new(ManualTimer::new(), []).halt_after(2);
        assert!(armband.pump_events(TICK).is_ok());
        assert!(armband.pump_events(TICK).is_ok());
        assert!(matches!(
            armband.pump_events(TICK),
            Err(DeviceError::Disconnected)
        ));
        assert_eq!(armband.pumps(), 2);
    }

    #[test]
    fn test_commands_are_recorded() {
        let mut armband = ScriptedArmband::new(ManualTimer::new(), []);
        armband
            .send(DeviceCommand::Unlock(UnlockMode::Hold))
            .expect("scripted");
        armband.send(DeviceCommand::NotifyUserAction).expect("scripted");
        assert_eq!(
            armband.sent_commands(),
            &[
                DeviceCommand::Unlock(UnlockMode::Hold),
                DeviceCommand::NotifyUserAction
            ]
        );
    }

    #[test]
    fn test_empty_hub_waits_out_timeout() {
        let clock = ManualTimer::new();
        let mut hub = ScriptedHub::empty(clock.clone());
        let err = hub.find_device(Duration::from_secs(10)).err();
        assert!(matches!(
            err,
            Some(DeviceError::NotFound { timeout_ms: 10_000 })
        ));
        assert_eq!(clock.now(), 10_000_000_000);
    }
}
