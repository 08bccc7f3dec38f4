use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Modem session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ModemConfig {
    /// Access point name used by the PPP dial script.
    pub apn: String,

    /// UART the modem is attached to.
    pub uart: String,

    /// Name of the modem device, for diagnostics.
    pub device: String,

    /// Start the PPP session as soon as the modem is powered.
    pub autostart: bool,

    /// Time to wait after asserting modem power before any traffic, in milliseconds.
    pub settle_delay_ms: u64,

    /// PPP daemon settings.
    pub ppp: PppConfig,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            apn: "internet".to_string(),
            uart: "ttyS1".to_string(),
            device: "gsm_ppp".to_string(),
            autostart: true,
            settle_delay_ms: 5000,
            ppp: PppConfig::default(),
        }
    }
}

/// Settings for the pppd-backed network stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PppConfig {
    /// Peer name passed to `pppd call`.
    pub peer: String,

    /// Network interface the PPP link comes up on.
    pub interface: String,

    /// How often the link monitor samples interface state, in milliseconds.
    pub poll_interval_ms: u64,

    /// Path to the pppd binary.
    pub pppd_path: PathBuf,
}

impl Default for PppConfig {
    fn default() -> Self {
        Self {
            peer: "gsm".to_string(),
            interface: "ppp0".to_string(),
            poll_interval_ms: 1000,
            pppd_path: PathBuf::from("/usr/sbin/pppd"),
        }
    }
}
