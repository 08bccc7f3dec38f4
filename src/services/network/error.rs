/// Errors reported by a network stack backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// The PPP daemon could not be launched
    #[error("failed to launch PPP daemon: {0}")]
    SpawnFailed(String),

    /// Stop was requested with no session in progress
    #[error("no PPP session is running")]
    NotRunning,

    /// A stack operation failed
    #[error("network stack operation failed: {operation} - {reason}")]
    OperationFailed {
        /// The operation that failed
        operation: &'static str,
        /// The reason the operation failed
        reason: String,
    },
}
