use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use super::{Direction, GpioBus, GpioPort, HardwareError, Level};

/// One call made against a simulated GPIO port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpioOperation {
    /// `configure` was called
    Configure {
        /// Controller label
        controller: String,
        /// Pin offset
        pin: u32,
        /// Requested direction
        direction: Direction,
        /// Requested initial level
        initial: Level,
        /// When the call was made
        at: Instant,
    },
    /// `set_level` was called
    SetLevel {
        /// Controller label
        controller: String,
        /// Pin offset
        pin: u32,
        /// Requested level
        level: Level,
        /// When the call was made
        at: Instant,
    },
}

#[derive(Default)]
struct SimState {
    missing_controllers: HashSet<String>,
    failing_pins: HashSet<(String, u32)>,
    levels: HashMap<(String, u32), Level>,
    operations: Vec<GpioOperation>,
}

/// In-memory GPIO bus for bench runs and tests.
///
/// Every controller label binds unless removed with
/// [`SimulatedGpioBus::without_controller`]. All calls are recorded in order.
#[derive(Clone, Default)]
pub struct SimulatedGpioBus {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedGpioBus {
    /// Bus where every controller is present and every pin works.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes binding `controller` fail with `DeviceNotFound`.
    pub fn without_controller(self, controller: &str) -> Self {
        self.lock().missing_controllers.insert(controller.to_string());
        self
    }

    /// Makes every operation on `pin` of `controller` fail with `ConfigFailed`.
    pub fn failing_pin(self, controller: &str, pin: u32) -> Self {
        self.lock()
            .failing_pins
            .insert((controller.to_string(), pin));
        self
    }

    /// Current level of a configured output pin.
    pub fn level(&self, controller: &str, pin: u32) -> Option<Level> {
        self.lock()
            .levels
            .get(&(controller.to_string(), pin))
            .copied()
    }

    /// Every call made so far, oldest first.
    pub fn operations(&self) -> Vec<GpioOperation> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl GpioBus for SimulatedGpioBus {
    async fn bind(&self, controller: &str) -> Result<Arc<dyn GpioPort>, HardwareError> {
        if self.lock().missing_controllers.contains(controller) {
            return Err(HardwareError::DeviceNotFound {
                controller: controller.to_string(),
            });
        }

        Ok(Arc::new(SimulatedGpioPort {
            label: controller.to_string(),
            bus: self.clone(),
        }))
    }
}

struct SimulatedGpioPort {
    label: String,
    bus: SimulatedGpioBus,
}

impl SimulatedGpioPort {
    fn check(&self, state: &SimState, pin: u32) -> Result<(), HardwareError> {
        if state.failing_pins.contains(&(self.label.clone(), pin)) {
            return Err(HardwareError::ConfigFailed {
                controller: self.label.clone(),
                pin,
                reason: "simulated pin fault".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GpioPort for SimulatedGpioPort {
    async fn configure(
        &self,
        pin: u32,
        direction: Direction,
        initial: Level,
    ) -> Result<(), HardwareError> {
        let mut state = self.bus.lock();
        state.operations.push(GpioOperation::Configure {
            controller: self.label.clone(),
            pin,
            direction,
            initial,
            at: Instant::now(),
        });
        self.check(&state, pin)?;

        if direction == Direction::Output {
            state.levels.insert((self.label.clone(), pin), initial);
        }
        debug!(controller = %self.label, pin, ?direction, %initial, "Simulated pin configured");
        Ok(())
    }

    async fn set_level(&self, pin: u32, level: Level) -> Result<(), HardwareError> {
        let mut state = self.bus.lock();
        state.operations.push(GpioOperation::SetLevel {
            controller: self.label.clone(),
            pin,
            level,
            at: Instant::now(),
        });
        self.check(&state, pin)?;

        state.levels.insert((self.label.clone(), pin), level);
        debug!(controller = %self.label, pin, %level, "Simulated pin driven");
        Ok(())
    }
}
