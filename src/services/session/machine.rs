use std::{fmt, sync::Arc};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::SessionError;
use crate::services::{common::Property, network::NetworkStack};

/// Logical on/off state of the modem session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No PPP session.
    Stopped,
    /// PPP session started.
    Running,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Stopped => f.write_str("stopped"),
            SessionState::Running => f.write_str("running"),
        }
    }
}

/// The single point of truth for whether the modem session is running.
///
/// `start` and `stop` hold one lock across the network stack call, so only
/// one transition is ever in flight. Callers that arrive while a transition
/// is pending wait for it and are then served in arrival order.
pub struct ModemSession {
    stack: Arc<dyn NetworkStack>,
    state: Mutex<SessionState>,
    current: Property<SessionState>,
    since: Property<DateTime<Local>>,
}

impl ModemSession {
    /// Session in `initial` state over `stack`. No stack call is made.
    pub fn new(stack: Arc<dyn NetworkStack>, initial: SessionState) -> Self {
        Self {
            stack,
            state: Mutex::new(initial),
            current: Property::new(initial),
            since: Property::new(Local::now()),
        }
    }

    /// Last committed state. May be stale while a transition is in flight.
    pub fn state(&self) -> SessionState {
        self.current.get()
    }

    /// When the session last entered its current state.
    pub fn since(&self) -> DateTime<Local> {
        self.since.get()
    }

    /// Starts the PPP session.
    ///
    /// # Errors
    /// Returns `SessionError::AlreadyRunning` without touching the stack if
    /// the session is running, or `SessionError::Stack` if the stack refuses;
    /// the state is unchanged in both cases.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), SessionError> {
        self.transition(SessionState::Running).await
    }

    /// Stops the PPP session.
    ///
    /// # Errors
    /// Returns `SessionError::AlreadyStopped` without touching the stack if
    /// the session is stopped, or `SessionError::Stack` if the stack refuses;
    /// the state is unchanged in both cases.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SessionError> {
        self.transition(SessionState::Stopped).await
    }

    async fn transition(&self, target: SessionState) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;

        if *state == target {
            let err = match target {
                SessionState::Running => SessionError::AlreadyRunning,
                SessionState::Stopped => SessionError::AlreadyStopped,
            };
            warn!(state = %*state, "Rejected redundant session transition");
            return Err(err);
        }

        let result = match target {
            SessionState::Running => self.stack.start_session().await,
            SessionState::Stopped => self.stack.stop_session().await,
        };
        if let Err(e) = result {
            warn!(from = %*state, to = %target, error = %e, "Network stack refused transition");
            return Err(e.into());
        }

        *state = target;
        self.since.set(Local::now());
        self.current.set(target);
        info!(state = %target, "Modem session transitioned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::network::{SimulatedStack, StackCall, StackError};

    fn session(initial: SessionState) -> (ModemSession, SimulatedStack) {
        let stack = SimulatedStack::default();
        (ModemSession::new(Arc::new(stack.clone()), initial), stack)
    }

    #[tokio::test]
    async fn start_from_stopped_runs() {
        let (session, stack) = session(SessionState::Stopped);

        session.start().await.unwrap();

        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(stack.calls(), vec![StackCall::Start]);
    }

    #[tokio::test]
    async fn start_while_running_is_rejected_without_side_effect() {
        let (session, stack) = session(SessionState::Running);

        assert_eq!(session.start().await, Err(SessionError::AlreadyRunning));
        assert_eq!(session.start().await, Err(SessionError::AlreadyRunning));

        assert_eq!(session.state(), SessionState::Running);
        assert!(stack.calls().is_empty());
    }

    #[tokio::test]
    async fn stop_while_stopped_is_rejected_without_side_effect() {
        let (session, stack) = session(SessionState::Stopped);

        assert_eq!(session.stop().await, Err(SessionError::AlreadyStopped));

        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(stack.stop_calls(), 0);
    }

    #[tokio::test]
    async fn stack_refusal_keeps_state() {
        let (session, stack) = session(SessionState::Running);
        stack.set_fail_stop(true);

        let err = session.stop().await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::Stack(StackError::OperationFailed { operation: "stop_session", .. })
        ));
        assert_eq!(session.state(), SessionState::Running);

        stack.set_fail_stop(false);
        session.stop().await.unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(stack.stop_calls(), 2);
    }

    #[tokio::test]
    async fn rejection_messages_match_operator_text() {
        assert_eq!(
            SessionError::AlreadyRunning.to_string(),
            "Modem is already started."
        );
        assert_eq!(
            SessionError::AlreadyStopped.to_string(),
            "Modem is already stopped."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_serialize_in_arrival_order() {
        let stack = SimulatedStack::default().with_call_delay(Duration::from_millis(50));
        let session = Arc::new(ModemSession::new(
            Arc::new(stack.clone()),
            SessionState::Stopped,
        ));

        // start, start, stop, stop, start, arriving while the first is in flight
        let plan = [true, true, false, false, true];
        let mut handles = Vec::new();
        for start in plan {
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                if start {
                    session.start().await
                } else {
                    session.stop().await
                }
            }));
            tokio::task::yield_now().await;
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(
            results,
            vec![
                Ok(()),
                Err(SessionError::AlreadyRunning),
                Ok(()),
                Err(SessionError::AlreadyStopped),
                Ok(()),
            ]
        );
        assert_eq!(
            stack.calls(),
            vec![StackCall::Start, StackCall::Stop, StackCall::Start]
        );
        assert_eq!(session.state(), SessionState::Running);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_requests_never_issue_redundant_stack_calls() {
        let stack = SimulatedStack::default();
        let session = Arc::new(ModemSession::new(
            Arc::new(stack.clone()),
            SessionState::Stopped,
        ));

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let session = session.clone();
                tokio::spawn(async move {
                    if i % 3 == 0 {
                        session.stop().await
                    } else {
                        session.start().await
                    }
                })
            })
            .collect();
        for handle in handles {
            let _ = handle.await.unwrap();
        }

        let calls = stack.calls();
        assert!(calls.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(calls.first(), Some(&StackCall::Start));
        let expected = match calls.last() {
            Some(StackCall::Start) => SessionState::Running,
            _ => SessionState::Stopped,
        };
        assert_eq!(session.state(), expected);
    }
}
