use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{
    EventStream, NetEvent, NetEventKind, NetworkStack, StackError, stack::broadcast_events,
};

const EVENT_CAPACITY: usize = 64;

/// A call made against the simulated stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCall {
    /// `start_session`
    Start,
    /// `stop_session`
    Stop,
}

/// In-memory network stack for bench runs and tests.
///
/// Starting emits `InterfaceUp`, `AddressAssigned` and `L4Connected`;
/// stopping emits `L4Disconnected` and `InterfaceDown`. Every call is
/// recorded, including refused ones.
#[derive(Clone)]
pub struct SimulatedStack {
    interface: String,
    call_delay: Duration,
    events_tx: broadcast::Sender<NetEvent>,
    calls: Arc<Mutex<Vec<StackCall>>>,
    fail_start: Arc<AtomicBool>,
    fail_stop: Arc<AtomicBool>,
}

impl Default for SimulatedStack {
    fn default() -> Self {
        Self::new("ppp0")
    }
}

impl SimulatedStack {
    /// Stack whose link comes up on `interface`.
    pub fn new(interface: impl Into<String>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            interface: interface.into(),
            call_delay: Duration::ZERO,
            events_tx,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_start: Arc::new(AtomicBool::new(false)),
            fail_stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes each start/stop call take `delay` before it completes.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    /// Makes subsequent `start_session` calls fail.
    pub fn set_fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `stop_session` calls fail.
    pub fn set_fail_stop(&self, fail: bool) {
        self.fail_stop.store(fail, Ordering::SeqCst);
    }

    /// Emits an arbitrary event to all subscribers.
    pub fn inject(&self, kind: NetEventKind) {
        self.emit(kind);
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<StackCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of `start_session` calls received.
    pub fn start_calls(&self) -> usize {
        self.count(StackCall::Start)
    }

    /// Number of `stop_session` calls received.
    pub fn stop_calls(&self) -> usize {
        self.count(StackCall::Stop)
    }

    fn count(&self, call: StackCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: StackCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn emit(&self, kind: NetEventKind) {
        debug!(?kind, interface = %self.interface, "Simulated network event");
        let _ = self.events_tx.send(NetEvent::new(kind, self.interface.clone()));
    }
}

#[async_trait]
impl NetworkStack for SimulatedStack {
    async fn start_session(&self) -> Result<(), StackError> {
        self.record(StackCall::Start);
        if !self.call_delay.is_zero() {
            tokio::time::sleep(self.call_delay).await;
        }
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(StackError::OperationFailed {
                operation: "start_session",
                reason: "simulated failure".to_string(),
            });
        }

        info!(interface = %self.interface, "Simulated PPP session started");
        self.emit(NetEventKind::InterfaceUp);
        self.emit(NetEventKind::AddressAssigned);
        self.emit(NetEventKind::L4Connected);
        Ok(())
    }

    async fn stop_session(&self) -> Result<(), StackError> {
        self.record(StackCall::Stop);
        if !self.call_delay.is_zero() {
            tokio::time::sleep(self.call_delay).await;
        }
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(StackError::OperationFailed {
                operation: "stop_session",
                reason: "simulated failure".to_string(),
            });
        }

        info!(interface = %self.interface, "Simulated PPP session stopped");
        self.emit(NetEventKind::L4Disconnected);
        self.emit(NetEventKind::InterfaceDown);
        Ok(())
    }

    fn events(&self) -> EventStream {
        broadcast_events(&self.events_tx)
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::services::network::{NetEventMask, subscribe};

    #[tokio::test]
    async fn start_and_stop_emit_link_events_in_order() {
        let stack = SimulatedStack::default();
        let mut events = stack.events();

        stack.start_session().await.unwrap();
        stack.stop_session().await.unwrap();

        let mut kinds = Vec::new();
        for _ in 0..5 {
            kinds.push(events.next().await.unwrap().kind);
        }
        assert_eq!(
            kinds,
            vec![
                NetEventKind::InterfaceUp,
                NetEventKind::AddressAssigned,
                NetEventKind::L4Connected,
                NetEventKind::L4Disconnected,
                NetEventKind::InterfaceDown,
            ]
        );
        assert_eq!(stack.calls(), vec![StackCall::Start, StackCall::Stop]);
    }

    #[tokio::test]
    async fn subscription_mask_drops_other_kinds() {
        let stack = SimulatedStack::default();
        let mut events = subscribe(
            &stack,
            NetEventMask::L4_CONNECTED | NetEventMask::L4_DISCONNECTED,
        );

        stack.inject(NetEventKind::InterfaceUp);
        stack.inject(NetEventKind::AddressAssigned);
        stack.inject(NetEventKind::L4Connected);
        stack.inject(NetEventKind::InterfaceDown);
        stack.inject(NetEventKind::L4Disconnected);

        assert_eq!(events.next().await.unwrap().kind, NetEventKind::L4Connected);
        assert_eq!(
            events.next().await.unwrap().kind,
            NetEventKind::L4Disconnected
        );
    }

    #[tokio::test]
    async fn forced_failure_is_recorded_and_silent() {
        let stack = SimulatedStack::default();
        stack.set_fail_start(true);

        let err = stack.start_session().await.unwrap_err();

        assert!(matches!(err, StackError::OperationFailed { operation: "start_session", .. }));
        assert_eq!(stack.start_calls(), 1);
    }
}
