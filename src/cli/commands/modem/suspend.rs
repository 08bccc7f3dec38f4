use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    services::LifecycleController,
};

/// Stops the modem session, leaving the modem powered.
pub struct SuspendCommand {
    controller: Arc<LifecycleController>,
}

impl SuspendCommand {
    /// Creates a new SuspendCommand
    pub fn new(controller: Arc<LifecycleController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl Command for SuspendCommand {
    /// # Errors
    ///
    /// Returns `CliError::Rejected("Modem is already stopped.")` if the session
    /// is stopped, or `CliError::ServiceError` if the network stack refuses.
    async fn execute(&self, _args: &[String]) -> CommandResult {
        self.controller.suspend().await?;
        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "suspend".to_string(),
            description: "Suspend the modem".to_string(),
            category: "modem".to_string(),
            args: vec![],
            examples: vec!["modem suspend".to_string()],
        }
    }
}
