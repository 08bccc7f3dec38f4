use std::{sync::Arc, time::Duration};

use tracing::{error, info, instrument};

use super::{LineRole, PowerLine};
use crate::{
    config::LifecycleConfig,
    services::{
        common::Property,
        gpio::{GpioBus, HardwareError},
    },
};

/// Drives the SIM-select and modem-enable lines in order at boot.
///
/// SIM selection has to be stable before modem power is applied, otherwise
/// the modem may latch the wrong slot. After power, the modem firmware needs
/// the settle delay before any UART or PPP traffic.
pub struct PowerSequencer {
    bus: Arc<dyn GpioBus>,
    sim_select: PowerLine,
    modem_enable: PowerLine,
    settle_delay: Duration,
    powered: Property<bool>,
}

impl PowerSequencer {
    /// Sequencer for the lines described by `config`.
    pub fn new(bus: Arc<dyn GpioBus>, config: &LifecycleConfig) -> Self {
        Self {
            bus,
            sim_select: PowerLine::new(LineRole::SimSelect, config.sim_select.clone()),
            modem_enable: PowerLine::new(LineRole::ModemEnable, config.modem_enable.clone()),
            settle_delay: config.settle_delay,
            powered: Property::new(false),
        }
    }

    /// Whether the full sequence, settle delay included, has completed.
    pub fn powered(&self) -> Property<bool> {
        self.powered.clone()
    }

    /// The line with the given role.
    pub fn line(&self, role: LineRole) -> &PowerLine {
        match role {
            LineRole::SimSelect => &self.sim_select,
            LineRole::ModemEnable => &self.modem_enable,
        }
    }

    /// Runs the power-up sequence.
    ///
    /// In strict order: configure and assert SIM select, configure and assert
    /// modem enable, then wait out the settle delay. Aborts at the first
    /// failing step, leaving later lines untouched.
    ///
    /// # Errors
    /// Returns the `HardwareError` of the first step that failed.
    #[instrument(skip(self), fields(settle_delay_ms = self.settle_delay.as_millis() as u64))]
    pub async fn run_power_up_sequence(&mut self) -> Result<(), HardwareError> {
        for line in [&mut self.sim_select, &mut self.modem_enable] {
            let role = line.role();
            let result = match line.configure_line(self.bus.as_ref()).await {
                Ok(()) => line.assert_line().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                error!(%role, error = %e, "Power-up sequence aborted");
                return Err(e);
            }
        }

        tokio::time::sleep(self.settle_delay).await;

        self.powered.set(true);
        info!("Modem on");
        Ok(())
    }
}
