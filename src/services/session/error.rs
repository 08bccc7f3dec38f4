use crate::services::network::StackError;

/// Rejected or failed session transitions.
///
/// None of these change the session state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Start requested while the session is running
    #[error("Modem is already started.")]
    AlreadyRunning,

    /// Stop requested while the session is stopped
    #[error("Modem is already stopped.")]
    AlreadyStopped,

    /// The network stack refused the transition
    #[error(transparent)]
    Stack(#[from] StackError),
}
