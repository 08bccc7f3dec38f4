use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use super::LifecycleError;
use crate::{
    config::LifecycleConfig,
    services::{
        common::Property,
        connectivity::ConnectivityObserver,
        gpio::GpioBus,
        network::{ConnectivityStatus, NetworkStack},
        power::PowerSequencer,
        session::{ModemSession, SessionError, SessionState},
    },
};

/// Owns the modem's runtime state and sequences its bring-up.
///
/// Created by [`LifecycleController::boot`]; everything it hands out is a
/// read handle except [`suspend`](Self::suspend) and [`resume`](Self::resume),
/// which go through the session's lock.
pub struct LifecycleController {
    config: Arc<LifecycleConfig>,
    powered: Property<bool>,
    session: ModemSession,
    connectivity: ConnectivityObserver,
    observer_task: JoinHandle<()>,
}

impl LifecycleController {
    /// Powers the modem up and brings the session to its configured state.
    ///
    /// Runs the power-up sequence, creates the session stopped, subscribes the
    /// connectivity observer, then starts the session if autostart is set. The
    /// observer subscribes before autostart so the first connect event is seen.
    /// A refused autostart leaves the session stopped; the operator can resume.
    ///
    /// # Errors
    /// Returns `LifecycleError::PowerUp` if either power line cannot be
    /// configured or asserted. No network stack call is made in that case.
    #[instrument(skip_all, fields(board = %config.board, autostart = config.autostart))]
    pub async fn boot(
        config: LifecycleConfig,
        gpio: Arc<dyn GpioBus>,
        stack: Arc<dyn NetworkStack>,
    ) -> Result<Self, LifecycleError> {
        let mut power = PowerSequencer::new(gpio, &config);
        power.run_power_up_sequence().await?;

        info!(
            board = %config.board,
            apn = %config.apn,
            uart = %config.uart,
            device = %config.modem_device,
            "Modem powered"
        );

        let session = ModemSession::new(stack.clone(), SessionState::Stopped);
        let connectivity = ConnectivityObserver::new();
        let observer_task = connectivity.register(stack.as_ref());

        if config.autostart {
            if let Err(e) = session.start().await {
                warn!(error = %e, "Autostart failed, session left stopped");
            }
        } else {
            info!("Autostart disabled, session left stopped");
        }

        Ok(Self {
            config: Arc::new(config),
            powered: power.powered(),
            session,
            connectivity,
            observer_task,
        })
    }

    /// Stops the modem session. Hardware power stays asserted.
    ///
    /// # Errors
    /// Returns `SessionError::AlreadyStopped` if the session is not running,
    /// or `SessionError::Stack` if the network stack refuses.
    pub async fn suspend(&self) -> Result<(), SessionError> {
        self.session.stop().await
    }

    /// Starts the modem session again.
    ///
    /// # Errors
    /// Returns `SessionError::AlreadyRunning` if the session is running,
    /// or `SessionError::Stack` if the network stack refuses.
    pub async fn resume(&self) -> Result<(), SessionError> {
        self.session.start().await
    }

    /// Configuration the controller was booted with.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Whether the power-up sequence completed.
    pub fn is_powered(&self) -> bool {
        self.powered.get()
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// The modem session.
    pub fn session(&self) -> &ModemSession {
        &self.session
    }

    /// Last observed connectivity status.
    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity.status()
    }

    /// The connectivity observer.
    pub fn connectivity(&self) -> &ConnectivityObserver {
        &self.connectivity
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        self.observer_task.abort();
    }
}
