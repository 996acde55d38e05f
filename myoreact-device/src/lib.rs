//! Armband access: the narrow contract the experiment needs from a device,
//! plus the backends that implement it.
//!
//! Nothing here knows about trials. A [`Hub`] finds one [`Armband`]; the
//! armband is pumped for a bounded duration and hands back whatever
//! [`DeviceEvent`](myoreact_core::DeviceEvent)s arrived, and accepts unlock /
//! haptic / streaming commands.

pub mod console;
pub mod error;
pub mod hub;
pub mod scripted;
pub mod simulated;

pub use console::{ConsoleArmband, ConsoleHub};
pub use error::DeviceError;
pub use hub::{Armband, Hub};
pub use scripted::{ScriptStep, ScriptedArmband, ScriptedHub};
pub use simulated::{SimulatedArmband, SimulatedHub};
