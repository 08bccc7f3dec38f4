use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of the board the modem is mounted on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BoardConfig {
    /// Board name, reported in the boot banner and `modem status`.
    pub name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "generic".to_string(),
        }
    }
}
