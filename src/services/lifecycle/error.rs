use crate::services::gpio::HardwareError;

/// Failures that halt lifecycle initialization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The power-up sequence failed; no session may be started
    #[error("modem power-up failed: {0}")]
    PowerUp(#[from] HardwareError),
}
