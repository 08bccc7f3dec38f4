use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    services::LifecycleController,
};

/// Reports power, session and connectivity state.
pub struct StatusCommand {
    controller: Arc<LifecycleController>,
}

impl StatusCommand {
    /// Creates a new StatusCommand
    pub fn new(controller: Arc<LifecycleController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl Command for StatusCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let config = self.controller.config();
        let session = self.controller.session();

        Ok([
            format!("board:        {}", config.board),
            format!("apn:          {}", config.apn),
            format!(
                "power:        {}",
                if self.controller.is_powered() { "on" } else { "off" }
            ),
            format!(
                "session:      {} (since {})",
                session.state(),
                session.since().format("%Y-%m-%d %H:%M:%S")
            ),
            format!("connectivity: {}", self.controller.connectivity_status()),
        ]
        .join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Show modem power, session and connectivity".to_string(),
            category: "modem".to_string(),
            args: vec![],
            examples: vec!["modem status".to_string()],
        }
    }
}
