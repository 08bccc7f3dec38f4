use std::sync::Arc;

use async_trait::async_trait;

use super::{Direction, HardwareError, Level};

/// Access to the board's GPIO controllers.
#[async_trait]
pub trait GpioBus: Send + Sync {
    /// Binds to the controller with the given label.
    ///
    /// # Errors
    /// Returns `HardwareError::DeviceNotFound` if no such controller exists.
    async fn bind(&self, controller: &str) -> Result<Arc<dyn GpioPort>, HardwareError>;
}

/// One bound GPIO controller.
#[async_trait]
pub trait GpioPort: Send + Sync {
    /// Sets the pin's direction; outputs start at `initial`.
    ///
    /// # Errors
    /// Returns `HardwareError::ConfigFailed` if the pin cannot be configured.
    async fn configure(
        &self,
        pin: u32,
        direction: Direction,
        initial: Level,
    ) -> Result<(), HardwareError>;

    /// Drives an output pin to `level`.
    ///
    /// # Errors
    /// Returns `HardwareError::ConfigFailed` if the level cannot be set.
    async fn set_level(&self, pin: u32, level: Level) -> Result<(), HardwareError>;
}
