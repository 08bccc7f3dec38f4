use std::sync::Arc;

use super::{
    CliError, CommandRegistry,
    formatting::{format_category, format_command, format_description, format_header, format_usage},
};
use crate::{config::Config, services::LifecycleController};

/// Front end of the operator command dispatcher.
///
/// Turns a command line into a registry lookup and renders help.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a CLI service with all built-in commands registered.
    ///
    /// # Arguments
    /// * `controller` - Modem lifecycle the `modem` commands act on
    /// * `config` - Loaded configuration the `config` commands read
    pub fn new(controller: Arc<LifecycleController>, config: Arc<Config>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_all_commands(controller, config);

        CliService { registry }
    }

    /// Executes one whitespace-separated command line.
    ///
    /// `help` (optionally followed by a category) renders help instead of
    /// running a command. A blank line yields an empty response.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` for an unknown command, or the
    /// command's own error.
    pub async fn execute_line(&self, line: &str) -> Result<String, CliError> {
        let words: Vec<String> = line.split_whitespace().map(str::to_string).collect();

        match words.as_slice() {
            [] => Ok(String::new()),
            [help] if help == "help" => Ok(self.help(None)),
            [help, category] if help == "help" => Ok(self.help(Some(category.as_str()))),
            [category] => Err(CliError::InvalidArguments(format!(
                "Missing command for category '{category}', try 'help {category}'"
            ))),
            [category, command, args @ ..] => {
                self.execute_command(category, command, args).await
            }
        }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the
    /// category, or the command's own error.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args).await
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Help text for every category, or just `only`.
    pub fn help(&self, only: Option<&str>) -> String {
        let mut out = vec![format_header("Commands:")];

        for (category, commands) in self.list_all() {
            if only.is_some_and(|wanted| wanted != category) {
                continue;
            }

            out.push(format_category(&category));
            for name in commands {
                let Ok(command) = self.registry.find(&category, &name) else {
                    continue;
                };
                let metadata = command.metadata();
                let args: String = metadata
                    .args
                    .iter()
                    .map(|arg| {
                        if arg.required {
                            format!(" <{}>", arg.name)
                        } else {
                            format!(" [{}]", arg.name)
                        }
                    })
                    .collect();

                out.push(format!(
                    "  {}{}  {}",
                    format_command(&name),
                    args,
                    format_description(&metadata.description)
                ));
                for example in &metadata.examples {
                    out.push(format!("      {}", format_usage(example)));
                }
            }
        }

        out.join("\n")
    }
}
