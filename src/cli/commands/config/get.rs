use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_toml_value,
        types::{CommandArg, CommandMetadata},
    },
    config::Config,
};

/// Command for reading a single value out of the loaded configuration.
///
/// # Example Usage
///
/// ```bash
/// modemd> config get modem.apn
/// modemd> config get gpio.modem_enable.pin
/// ```
pub struct GetCommand {
    config: Arc<Config>,
}

impl GetCommand {
    /// Creates a new GetCommand over the loaded configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn lookup(&self, path: &str) -> Result<toml::Value, CliError> {
        let root = toml::Value::try_from(self.config.as_ref()).map_err(|e| {
            CliError::ServiceError {
                service: "Config".to_string(),
                details: e.to_string(),
            }
        })?;

        path.split('.')
            .try_fold(&root, |value, key| value.get(key))
            .cloned()
            .ok_or_else(|| {
                CliError::InvalidArguments(format!("Unknown configuration path '{path}'"))
            })
    }
}

#[async_trait]
impl Command for GetCommand {
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If no path is given or nothing lives at it
    /// * `CliError::ServiceError` - If the configuration cannot be serialized
    async fn execute(&self, args: &[String]) -> CommandResult {
        let path = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <path> argument for 'get' command".to_string())
        })?;

        let value = self.lookup(path)?;

        Ok(format!("{path}: {}", format_toml_value(&value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get configuration value".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "path".to_string(),
                description: "Configuration path (e.g., modem.apn)".to_string(),
                required: true,
            }],
            examples: vec![
                "config get modem.apn".to_string(),
                "config get gpio.modem_enable.pin".to_string(),
            ],
        }
    }
}
