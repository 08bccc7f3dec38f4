use std::{collections::HashMap, sync::Arc};

use super::{
    CliError, Command,
    commands::{config, modem},
    types::CommandMetadata,
};
use crate::{config::Config, services::LifecycleController};

/// Registry for operator commands organized by category.
///
/// ```text
/// registry
/// ├── config
/// │   ├── get
/// │   ├── schema
/// │   └── show
/// └── modem
///     ├── resume
///     ├── status
///     └── suspend
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command in the specified category.
    ///
    /// The command's metadata name is its key within the category; a command
    /// with the same name replaces the earlier one.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does not
    /// exist, `CliError::InvalidArguments` if the argument count does not
    /// match the command's metadata, and otherwise whatever the command
    /// itself returns.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let command = self.find(category, command_name)?;

        Self::validate_args(&command.metadata(), args)?;

        command.execute(args).await
    }

    /// Looks up a command without executing it.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does not exist.
    pub fn find(&self, category: &str, command_name: &str) -> Result<&dyn Command, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        found_category
            .get(command_name)
            .map(|command| command.as_ref())
            .ok_or_else(|| {
                CliError::CommandNotFound(format!(
                    "Failed to find command '{command_name}' in '{category}'"
                ))
            })
    }

    /// Lists all registered commands organized by category, sorted by name.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers every built-in command.
    pub fn register_all_commands(
        &mut self,
        controller: Arc<LifecycleController>,
        config: Arc<Config>,
    ) {
        modem::register_commands(self, controller);
        config::register_commands(self, config);
    }
}
