pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod state;
pub mod tracker;

pub use config::ExperimentConfig;
pub use error::ExperimentError;
pub use report::TrialReport;
pub use session::{DeviceSession, EventSource};
pub use state::TrialTimer;
pub use tracker::PoseStateTracker;
