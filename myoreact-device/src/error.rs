use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    /// Discovery ran out of time without finding an armband.
    #[error("Unable to find an armband within {timeout_ms} ms")]
    NotFound { timeout_ms: u64 },

    /// The event stream ended; no further events will arrive.
    #[error("Armband disconnected")]
    Disconnected,

    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),
}
