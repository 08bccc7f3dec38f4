//! Modem session commands.
mod resume;
mod status;
mod suspend;

use std::sync::Arc;

pub use resume::ResumeCommand;
pub use status::StatusCommand;
pub use suspend::SuspendCommand;

use crate::{cli::CommandRegistry, services::LifecycleController};

/// Registers the "modem" category: `resume`, `suspend` and `status`.
pub fn register_commands(registry: &mut CommandRegistry, controller: Arc<LifecycleController>) {
    const CATEGORY_NAME: &str = "modem";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(ResumeCommand::new(controller.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(SuspendCommand::new(controller.clone())),
    );
    registry.register_command(CATEGORY_NAME, Box::new(StatusCommand::new(controller)));
}
