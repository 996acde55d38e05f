use myoreact_core::Phase;
use myoreact_device::DeviceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("cannot {action} during the {phase:?} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
