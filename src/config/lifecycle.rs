use std::time::Duration;

use super::{Config, ConfigError, LogLevel, PinConfig, PppConfig};
use crate::services::{gpio::Level, power::LineRole};

/// Immutable configuration snapshot the modem lifecycle runs on.
///
/// Produced once at startup by [`Config::validate`]; every pin assignment is
/// guaranteed present and every duration non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleConfig {
    /// Board name.
    pub board: String,
    /// Access point name.
    pub apn: String,
    /// UART the modem is attached to.
    pub uart: String,
    /// Modem device name.
    pub modem_device: String,
    /// Start the session right after power-up.
    pub autostart: bool,
    /// Wait after asserting modem power.
    pub settle_delay: Duration,
    /// SIM slot selection line.
    pub sim_select: PinAssignment,
    /// Modem power-enable line.
    pub modem_enable: PinAssignment,
    /// PPP daemon settings.
    pub ppp: PppConfig,
    /// Configured log level.
    pub log_level: LogLevel,
}

/// A validated GPIO pin assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAssignment {
    /// GPIO controller label.
    pub controller: String,
    /// Pin offset within the controller.
    pub pin: u32,
    /// Electrical level that asserts the line.
    pub active_level: Level,
}

impl Config {
    /// Validates the loaded configuration into a [`LifecycleConfig`].
    ///
    /// # Errors
    /// Returns `ConfigError::MissingPinAssignment` if either power line has no
    /// pin, and `ConfigError::InvalidConfigField` for empty identifiers or a
    /// zero duration.
    pub fn validate(&self) -> Result<LifecycleConfig, ConfigError> {
        let sim_select = pin_assignment(
            self.gpio.sim_select.as_ref(),
            LineRole::SimSelect,
            "sim_select",
        )?;
        let modem_enable = pin_assignment(
            self.gpio.modem_enable.as_ref(),
            LineRole::ModemEnable,
            "modem_enable",
        )?;

        if self.modem.settle_delay_ms == 0 {
            return Err(ConfigError::invalid_field(
                "modem",
                "settle_delay_ms",
                "must be greater than zero",
            ));
        }
        if self.modem.ppp.poll_interval_ms == 0 {
            return Err(ConfigError::invalid_field(
                "modem.ppp",
                "poll_interval_ms",
                "must be greater than zero",
            ));
        }
        if self.modem.ppp.interface.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "modem.ppp",
                "interface",
                "must not be empty",
            ));
        }

        Ok(LifecycleConfig {
            board: self.board.name.clone(),
            apn: self.modem.apn.clone(),
            uart: self.modem.uart.clone(),
            modem_device: self.modem.device.clone(),
            autostart: self.modem.autostart,
            settle_delay: Duration::from_millis(self.modem.settle_delay_ms),
            sim_select,
            modem_enable,
            ppp: self.modem.ppp.clone(),
            log_level: self.general.log_level,
        })
    }
}

fn pin_assignment(
    pin: Option<&PinConfig>,
    role: LineRole,
    key: &'static str,
) -> Result<PinAssignment, ConfigError> {
    let pin = pin.ok_or(ConfigError::MissingPinAssignment { role, key })?;

    if pin.controller.trim().is_empty() {
        return Err(ConfigError::invalid_field(
            &format!("gpio.{key}"),
            "controller",
            "must name a GPIO controller",
        ));
    }

    Ok(PinAssignment {
        controller: pin.controller.clone(),
        pin: pin.pin,
        active_level: pin.active_level,
    })
}
