use crate::error::DeviceError;
use myoreact_core::{DeviceCommand, DeviceEvent, StreamEmg, UnlockMode};
use std::time::Duration;

/// A connected armband.
pub trait Armband {
    fn set_stream_emg(&mut self, mode: StreamEmg) -> Result<(), DeviceError>;

    /// Run the device event loop for up to `budget` and return the events
    /// that arrived, oldest first.
    fn pump_events(&mut self, budget: Duration) -> Result<Vec<DeviceEvent>, DeviceError>;

    fn unlock(&mut self, mode: UnlockMode) -> Result<(), DeviceError>;

    /// Vibrate to acknowledge an action.
    fn notify_user_action(&mut self) -> Result<(), DeviceError>;

    fn send(&mut self, command: DeviceCommand) -> Result<(), DeviceError> {
        match command {
            DeviceCommand::Unlock(mode) => self.unlock(mode),
            DeviceCommand::NotifyUserAction => self.notify_user_action(),
        }
    }
}

/// Discovers armbands.
pub trait Hub {
    type Device: Armband;

    /// Wait up to `timeout` for an armband. `Ok(None)` when none showed up.
    fn wait_for_device(&mut self, timeout: Duration) -> Result<Option<Self::Device>, DeviceError>;

    /// Like [`Hub::wait_for_device`], but a missing device is an error.
    fn find_device(&mut self, timeout: Duration) -> Result<Self::Device, DeviceError> {
        self.wait_for_device(timeout)?
            .ok_or(DeviceError::NotFound {
                timeout_ms: timeout.as_millis() as u64,
            })
    }
}
