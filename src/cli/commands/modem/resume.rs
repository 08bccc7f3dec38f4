use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    services::LifecycleController,
};

/// Starts the modem session again after a suspend.
pub struct ResumeCommand {
    controller: Arc<LifecycleController>,
}

impl ResumeCommand {
    /// Creates a new ResumeCommand
    pub fn new(controller: Arc<LifecycleController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl Command for ResumeCommand {
    /// # Errors
    ///
    /// Returns `CliError::Rejected("Modem is already started.")` if the session
    /// is running, or `CliError::ServiceError` if the network stack refuses.
    async fn execute(&self, _args: &[String]) -> CommandResult {
        self.controller.resume().await?;
        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "resume".to_string(),
            description: "Resume the modem".to_string(),
            category: "modem".to_string(),
            args: vec![],
            examples: vec!["modem resume".to_string()],
        }
    }
}
