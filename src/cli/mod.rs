//! Operator command dispatcher.
//!
//! Commands are organized by category (`modem`, `config`) and generate
//! their help text from metadata. Lines arrive on the console shell and
//! each one is answered with a response or a negative errno failure code.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod shell;
mod types;

#[cfg(test)]
mod tests;

pub use commands::{
    config::{GetCommand, SchemaCommand, ShowCommand},
    modem::{ResumeCommand, StatusCommand, SuspendCommand},
};
pub use registry::CommandRegistry;
pub use service::CliService;
pub use shell::{run_shell, serve_console};
pub use types::{CliError, Command, CommandArg, CommandMetadata, CommandResult};
