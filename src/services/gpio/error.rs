/// Errors raised while configuring or driving power-control lines.
///
/// Any of these during the boot power-up sequence is boot-fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HardwareError {
    /// The GPIO controller the line is wired to is not available
    #[error("GPIO controller '{controller}' not found")]
    DeviceNotFound {
        /// Controller label that could not be bound
        controller: String,
    },

    /// Direction or level of a pin could not be set
    #[error("failed to configure pin {pin} on '{controller}': {reason}")]
    ConfigFailed {
        /// Controller label
        controller: String,
        /// Pin offset within the controller
        pin: u32,
        /// What went wrong
        reason: String,
    },
}
