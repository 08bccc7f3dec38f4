use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use super::{Direction, GpioBus, GpioPort, HardwareError, Level};

const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// GPIO through the Linux sysfs interface.
///
/// Controllers are the `gpiochipN` entries; a pin's global number is the
/// controller's `base` plus the pin offset.
#[derive(Debug, Clone)]
pub struct SysfsGpioBus {
    root: PathBuf,
}

impl Default for SysfsGpioBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsGpioBus {
    /// Bus rooted at `/sys/class/gpio`.
    pub fn new() -> Self {
        Self::with_root(SYSFS_GPIO_ROOT)
    }

    /// Bus rooted at an arbitrary directory laid out like `/sys/class/gpio`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl GpioBus for SysfsGpioBus {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn bind(&self, controller: &str) -> Result<Arc<dyn GpioPort>, HardwareError> {
        let not_found = || HardwareError::DeviceNotFound {
            controller: controller.to_string(),
        };

        let base = fs::read_to_string(self.root.join(controller).join("base"))
            .await
            .map_err(|_| not_found())?;
        let base: u32 = base.trim().parse().map_err(|_| not_found())?;

        debug!(base, "Bound GPIO controller");

        Ok(Arc::new(SysfsGpioPort {
            root: self.root.clone(),
            label: controller.to_string(),
            base,
        }))
    }
}

struct SysfsGpioPort {
    root: PathBuf,
    label: String,
    base: u32,
}

impl SysfsGpioPort {
    /// Global sysfs number of `pin`.
    fn global(&self, pin: u32) -> Result<u32, HardwareError> {
        self.base
            .checked_add(pin)
            .ok_or_else(|| self.config_failed(pin, format!("offset beyond base {}", self.base)))
    }

    fn pin_dir(&self, pin: u32) -> Result<PathBuf, HardwareError> {
        Ok(self.root.join(format!("gpio{}", self.global(pin)?)))
    }

    fn config_failed(&self, pin: u32, reason: impl Into<String>) -> HardwareError {
        HardwareError::ConfigFailed {
            controller: self.label.clone(),
            pin,
            reason: reason.into(),
        }
    }

    async fn write(&self, pin: u32, path: &Path, value: &str) -> Result<(), HardwareError> {
        fs::write(path, value)
            .await
            .map_err(|e| self.config_failed(pin, format!("write {}: {e}", path.display())))
    }
}

#[async_trait]
impl GpioPort for SysfsGpioPort {
    async fn configure(
        &self,
        pin: u32,
        direction: Direction,
        initial: Level,
    ) -> Result<(), HardwareError> {
        let pin_dir = self.pin_dir(pin)?;
        if !fs::try_exists(&pin_dir).await.unwrap_or(false) {
            let global = self.global(pin)?.to_string();
            self.write(pin, &self.root.join("export"), &global).await?;
        }

        // "low"/"high" set output direction and initial value in one write.
        let direction = match (direction, initial) {
            (Direction::Input, _) => "in",
            (Direction::Output, Level::Low) => "low",
            (Direction::Output, Level::High) => "high",
        };
        self.write(pin, &pin_dir.join("direction"), direction).await
    }

    async fn set_level(&self, pin: u32, level: Level) -> Result<(), HardwareError> {
        let value = match level {
            Level::Low => "0",
            Level::High => "1",
        };
        self.write(pin, &self.pin_dir(pin)?.join("value"), value).await
    }
}
