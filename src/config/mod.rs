//! Configuration schema definitions and validation.
//!
//! The daemon reads one TOML file (plus any board description files it
//! imports) into [`Config`], then validates it into the immutable
//! [`LifecycleConfig`] that the modem lifecycle runs on.

mod board;
mod error;
mod general;
mod gpio;
mod lifecycle;
mod loading;
mod modem;
mod paths;

#[cfg(test)]
mod tests;

pub use board::BoardConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, LogLevel};
pub use gpio::{GpioConfig, PinConfig};
pub use lifecycle::{LifecycleConfig, PinAssignment};
pub use modem::{ModemConfig, PppConfig};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the modem daemon.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. Everything except the GPIO pin assignments has a
/// default; pins must come from the board description.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// Board description files merged beneath this file, relative to it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Board identity.
    #[serde(default)]
    pub board: BoardConfig,

    /// Modem and PPP session settings.
    #[serde(default)]
    pub modem: ModemConfig,

    /// Power-control line assignments.
    #[serde(default)]
    pub gpio: GpioConfig,
}

impl Config {
    /// JSON schema of the configuration file.
    pub fn schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Config)).unwrap_or_default()
    }
}
