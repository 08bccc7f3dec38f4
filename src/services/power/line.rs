use std::{fmt, sync::Arc};

use tracing::{debug, instrument};

use crate::{
    config::PinAssignment,
    services::gpio::{Direction, GpioBus, GpioPort, HardwareError, Level},
};

/// What a power-control line does on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Selects which SIM slot the modem uses.
    SimSelect,
    /// Switches modem power.
    ModemEnable,
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRole::SimSelect => f.write_str("SIM select"),
            LineRole::ModemEnable => f.write_str("modem enable"),
        }
    }
}

/// One GPIO-controlled power signal.
///
/// Created once at boot from the board configuration and kept for the
/// lifetime of the process.
pub struct PowerLine {
    role: LineRole,
    assignment: PinAssignment,
    port: Option<Arc<dyn GpioPort>>,
}

impl PowerLine {
    /// Line for `role`, not yet bound to any controller.
    pub fn new(role: LineRole, assignment: PinAssignment) -> Self {
        Self {
            role,
            assignment,
            port: None,
        }
    }

    /// Role of the line.
    pub fn role(&self) -> LineRole {
        self.role
    }

    /// Level that asserts the line.
    pub fn active_level(&self) -> Level {
        self.assignment.active_level
    }

    /// Level the line rests at when not asserted.
    pub fn idle_level(&self) -> Level {
        !self.assignment.active_level
    }

    /// Whether [`PowerLine::configure_line`] has succeeded.
    pub fn is_configured(&self) -> bool {
        self.port.is_some()
    }

    /// Binds the line's controller and makes the pin an output at its idle level.
    ///
    /// # Errors
    /// Returns `HardwareError::DeviceNotFound` if the controller is unavailable
    /// and `HardwareError::ConfigFailed` if the pin cannot be configured.
    #[instrument(skip(self, bus), fields(role = %self.role, controller = %self.assignment.controller, pin = self.assignment.pin))]
    pub async fn configure_line(&mut self, bus: &dyn GpioBus) -> Result<(), HardwareError> {
        let port = bus.bind(&self.assignment.controller).await?;
        port.configure(self.assignment.pin, Direction::Output, self.idle_level())
            .await?;

        debug!(idle = %self.idle_level(), "Power line configured");
        self.port = Some(port);
        Ok(())
    }

    /// Drives the line to its active level.
    ///
    /// # Errors
    /// Returns `HardwareError::ConfigFailed` if the line was never configured
    /// or the level cannot be set.
    #[instrument(skip(self), fields(role = %self.role, pin = self.assignment.pin))]
    pub async fn assert_line(&self) -> Result<(), HardwareError> {
        let port = self.port.as_ref().ok_or_else(|| HardwareError::ConfigFailed {
            controller: self.assignment.controller.clone(),
            pin: self.assignment.pin,
            reason: format!("{} line asserted before it was configured", self.role),
        })?;

        port.set_level(self.assignment.pin, self.active_level()).await?;

        debug!(level = %self.active_level(), "Power line asserted");
        Ok(())
    }
}
