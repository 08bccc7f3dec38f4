use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt, future};
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, errors::BroadcastStreamRecvError};
use tracing::warn;

use super::{NetEvent, NetEventMask, StackError};

/// Stream of network stack events, in emission order.
pub type EventStream = Pin<Box<dyn Stream<Item = NetEvent> + Send>>;

/// The PPP network stack the modem session runs on.
#[async_trait]
pub trait NetworkStack: Send + Sync + 'static {
    /// Starts the PPP session.
    ///
    /// # Errors
    /// Returns a `StackError` if the session cannot be started.
    async fn start_session(&self) -> Result<(), StackError>;

    /// Stops the PPP session.
    ///
    /// # Errors
    /// Returns a `StackError` if the session cannot be stopped.
    async fn stop_session(&self) -> Result<(), StackError>;

    /// Every event emitted from now on.
    fn events(&self) -> EventStream;
}

/// Subscribes to `stack`, delivering only event kinds contained in `mask`.
pub fn subscribe(stack: &dyn NetworkStack, mask: NetEventMask) -> EventStream {
    stack
        .events()
        .filter(move |event| future::ready(mask.contains(event.kind.mask())))
        .boxed()
}

/// Wraps a broadcast receiver as an [`EventStream`], logging dropped events.
pub(super) fn broadcast_events(tx: &broadcast::Sender<NetEvent>) -> EventStream {
    BroadcastStream::new(tx.subscribe())
        .filter_map(|event| {
            future::ready(match event {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Network event subscriber lagged");
                    None
                }
            })
        })
        .boxed()
}
