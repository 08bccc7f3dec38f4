use async_trait::async_trait;
use thiserror::Error;

use crate::services::SessionError;

/// Errors that can occur during operator command execution.
///
/// Every variant maps to a numeric failure code through
/// [`CliError::code`], the way a shell command reports failure.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The modem rejected the request; the message is shown as-is.
    #[error("{0}")]
    Rejected(String),

    /// A backing service failed while carrying out the command.
    #[error("{service} error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// What went wrong
        details: String,
    },
}

impl CliError {
    /// Negative errno reported for this failure.
    ///
    /// Commands the modem refuses in its current state report `-ENOEXEC`;
    /// malformed or unknown commands report `-EINVAL`.
    pub fn code(&self) -> i32 {
        match self {
            CliError::Rejected(_) | CliError::ServiceError { .. } => -libc::ENOEXEC,
            CliError::CommandNotFound(_) | CliError::InvalidArguments(_) => -libc::EINVAL,
        }
    }
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::AlreadyRunning | SessionError::AlreadyStopped => {
                CliError::Rejected(error.to_string())
            }
            SessionError::Stack(e) => CliError::ServiceError {
                service: "Network stack".to_string(),
                details: e.to_string(),
            },
        }
    }
}

/// Type alias for command execution results.
///
/// Success carries the response text, which may be empty.
pub type CommandResult = Result<String, CliError>;

/// One argument a command accepts.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "path").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,
}

/// Complete metadata for an operator command.
///
/// Used for help generation, argument count validation, and lookup.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "resume", "suspend").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Arguments this command accepts, in order.
    pub args: Vec<CommandArg>,

    /// Example command lines to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "modem", "config").
    pub category: String,
}

/// Interface for all operator commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`Command::metadata`].
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failure, including requests the
    /// modem rejects in its current state.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
