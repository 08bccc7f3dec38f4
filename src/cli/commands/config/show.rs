use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Prints the effective configuration, imports already merged.
pub struct ShowCommand {
    config: Arc<Config>,
}

impl ShowCommand {
    /// Creates a new ShowCommand over the loaded configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        toml::to_string_pretty(self.config.as_ref()).map_err(|e| CliError::ServiceError {
            service: "Config".to_string(),
            details: e.to_string(),
        })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Show the effective configuration".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["config show".to_string()],
        }
    }
}
