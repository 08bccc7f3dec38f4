use thiserror::Error;

use crate::{config::ConfigError, services::lifecycle::LifecycleError};

/// Top-level error for the modem daemon.
///
/// Wraps the failures that can end the daemon: configuration that cannot be
/// loaded or validated, a boot-fatal lifecycle error, logging setup and
/// console I/O.
#[derive(Error, Debug)]
pub enum ModemdError {
    /// Configuration could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Modem lifecycle could not be brought up
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Tracing subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// Console or file I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for daemon-level operations.
pub type Result<T> = std::result::Result<T, ModemdError>;
