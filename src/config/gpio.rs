use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::gpio::Level;

/// Pin assignments for the two power-control lines.
///
/// Both are optional at the schema level so a board file can supply them;
/// validation rejects a configuration where either is still missing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct GpioConfig {
    /// SIM slot selection line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_select: Option<PinConfig>,

    /// Modem power-enable line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modem_enable: Option<PinConfig>,
}

/// One GPIO pin as described by the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PinConfig {
    /// GPIO controller label, e.g. `gpiochip0`.
    pub controller: String,

    /// Pin offset within the controller.
    pub pin: u32,

    /// Electrical level that asserts the line.
    #[serde(default)]
    pub active_level: Level,
}
