pub mod event;
pub mod phase;
pub mod pose;
pub mod snapshot;
pub mod trial;

pub use event::{DeviceCommand, DeviceEvent};
pub use phase::Phase;
pub use pose::{Arm, GestureCode, LockState, Pose, StreamEmg, UnlockMode, XDirection};
pub use snapshot::{EMG_CHANNELS, GestureSnapshot};
pub use trial::{Leg, TrialRecord};
