use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use tokio::{
    process::{Child, Command},
    sync::{Mutex, broadcast},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, instrument, trace, warn};

use super::{EventStream, NetEvent, NetEventKind, NetworkStack, StackError, stack::broadcast_events};
use crate::config::PppConfig;

const EVENT_CAPACITY: usize = 64;
const SYSFS_NET_ROOT: &str = "/sys/class/net";
const PROC_NET_ROUTE: &str = "/proc/net/route";

/// Network stack driven by the system `pppd`.
///
/// `start_session` runs `pppd call <peer>`, `stop_session` terminates it. A
/// background task samples the PPP interface and the routing table and turns
/// changes into [`NetEvent`]s. Must be created inside a Tokio runtime.
pub struct PppdStack {
    config: PppConfig,
    child: Mutex<Option<Child>>,
    events_tx: broadcast::Sender<NetEvent>,
    monitor: JoinHandle<()>,
}

impl PppdStack {
    /// Stack for the peer and interface in `config`; starts the link monitor.
    pub fn new(config: PppConfig) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let monitor = tokio::spawn(monitor_link(
            config.interface.clone(),
            Duration::from_millis(config.poll_interval_ms),
            events_tx.clone(),
        ));

        Self {
            config,
            child: Mutex::new(None),
            events_tx,
            monitor,
        }
    }
}

impl Drop for PppdStack {
    fn drop(&mut self) {
        self.monitor.abort();
    }
}

#[async_trait]
impl NetworkStack for PppdStack {
    #[instrument(skip(self), fields(peer = %self.config.peer))]
    async fn start_session(&self) -> Result<(), StackError> {
        let mut child = self.child.lock().await;
        if let Some(running) = child.as_mut() {
            match running.try_wait() {
                Ok(None) => {
                    debug!("pppd already running");
                    return Ok(());
                }
                Ok(Some(status)) => debug!(%status, "Previous pppd exited"),
                Err(e) => warn!(error = %e, "Could not poll previous pppd"),
            }
        }

        let spawned = Command::new(&self.config.pppd_path)
            .arg("call")
            .arg(&self.config.peer)
            .arg("nodetach")
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                StackError::SpawnFailed(format!("{}: {e}", self.config.pppd_path.display()))
            })?;

        info!(pid = spawned.id(), "pppd started");
        *child = Some(spawned);
        Ok(())
    }

    #[instrument(skip(self), fields(peer = %self.config.peer))]
    async fn stop_session(&self) -> Result<(), StackError> {
        let mut child = self.child.lock().await;
        let running = child.as_mut().ok_or(StackError::NotRunning)?;

        // Keep the handle until the kill succeeds.
        running
            .kill()
            .await
            .map_err(|e| StackError::OperationFailed {
                operation: "stop_session",
                reason: e.to_string(),
            })?;
        *child = None;

        info!("pppd stopped");
        Ok(())
    }

    fn events(&self) -> EventStream {
        broadcast_events(&self.events_tx)
    }
}

/// What the link monitor saw in one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LinkObservation {
    present: bool,
    routed: bool,
}

impl LinkObservation {
    /// Events that take the link from `self` to `next`, in order.
    fn transitions(self, next: LinkObservation) -> Vec<NetEventKind> {
        let mut events = Vec::new();
        if next.present && !self.present {
            events.push(NetEventKind::InterfaceUp);
        }
        if next.routed && !self.routed {
            events.push(NetEventKind::L4Connected);
        }
        if !next.routed && self.routed {
            events.push(NetEventKind::L4Disconnected);
        }
        if !next.present && self.present {
            events.push(NetEventKind::InterfaceDown);
        }
        events
    }
}

async fn monitor_link(
    interface: String,
    interval: Duration,
    events_tx: broadcast::Sender<NetEvent>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = LinkObservation::default();

    loop {
        ticker.tick().await;

        let next = observe(&interface).await;
        trace!(?next, "Link sample");
        for kind in last.transitions(next) {
            debug!(?kind, %interface, "Link transition");
            let _ = events_tx.send(NetEvent::new(kind, interface.clone()));
        }
        last = next;
    }
}

async fn observe(interface: &str) -> LinkObservation {
    let present = tokio::fs::try_exists(PathBuf::from(SYSFS_NET_ROOT).join(interface))
        .await
        .unwrap_or(false);
    let routed = present
        && tokio::fs::read_to_string(PROC_NET_ROUTE)
            .await
            .map(|table| has_default_route(&table, interface))
            .unwrap_or(false);

    LinkObservation { present, routed }
}

/// Whether `/proc/net/route` content has a default route through `interface`.
fn has_default_route(route_table: &str, interface: &str) -> bool {
    route_table.lines().skip(1).any(|line| {
        let mut fields = line.split_whitespace();
        matches!(
            (fields.next(), fields.next()),
            (Some(iface), Some("00000000")) if iface == interface
        )
    })
}
