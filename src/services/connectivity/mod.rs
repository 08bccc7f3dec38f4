//! Connectivity event observer.
//!
//! Subscribes to the network stack's connect/disconnect events and publishes
//! the last observed [`ConnectivityStatus`]. Purely observational: nothing
//! here feeds back into the modem session.

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::services::{
    common::Property,
    network::{ConnectivityStatus, NetEvent, NetEventKind, NetEventMask, NetworkStack, subscribe},
};

/// Owner and only writer of the process-wide [`ConnectivityStatus`].
#[derive(Clone, Debug)]
pub struct ConnectivityObserver {
    status: Property<ConnectivityStatus>,
}

impl Default for ConnectivityObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityObserver {
    /// Event kinds the observer subscribes to.
    pub const SUBSCRIPTION: NetEventMask =
        NetEventMask::L4_CONNECTED.union(NetEventMask::L4_DISCONNECTED);

    /// Observer with status `Unknown`.
    pub fn new() -> Self {
        Self {
            status: Property::new(ConnectivityStatus::Unknown),
        }
    }

    /// Subscribes to `stack` and handles each delivered event in order.
    ///
    /// The returned task runs until the stack's event stream ends.
    pub fn register(&self, stack: &dyn NetworkStack) -> JoinHandle<()> {
        let mut events = subscribe(stack, Self::SUBSCRIPTION);
        let observer = self.clone();

        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                observer.on_event(&event);
            }
            debug!("Network event stream closed");
        })
    }

    /// Applies one event to the connectivity status.
    ///
    /// Kinds outside [`Self::SUBSCRIPTION`] are discarded.
    #[instrument(skip(self), fields(kind = ?event.kind, interface = %event.interface))]
    pub fn on_event(&self, event: &NetEvent) {
        let status = match event.kind {
            NetEventKind::L4Connected => ConnectivityStatus::Connected,
            NetEventKind::L4Disconnected => ConnectivityStatus::Disconnected,
            _ => {
                debug!("Discarded unsubscribed network event");
                return;
            }
        };

        self.status.set(status);
        match status {
            ConnectivityStatus::Connected => info!("Network connected"),
            _ => info!("Network disconnected"),
        }
    }

    /// Last observed status; may race with an incoming event.
    pub fn status(&self) -> ConnectivityStatus {
        self.status.get()
    }

    /// Current status followed by every change.
    pub fn watch(&self) -> impl Stream<Item = ConnectivityStatus> + Send + use<> {
        self.status.watch()
    }
}
