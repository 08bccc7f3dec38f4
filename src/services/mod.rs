//! Modem lifecycle services.
//!
//! Leaf-first: the GPIO capability and the power sequencer built on it, the
//! network stack capability, the session state machine, the connectivity
//! observer, and the lifecycle controller that composes them.

/// Shared reactive state primitives
pub mod common;
/// Connectivity event observer
pub mod connectivity;
/// GPIO capability and backends
pub mod gpio;
/// Modem lifecycle controller
pub mod lifecycle;
/// Network/PPP stack capability and backends
pub mod network;
/// GPIO power sequencer
pub mod power;
/// Modem session state machine
pub mod session;

pub use connectivity::ConnectivityObserver;
pub use lifecycle::{LifecycleController, LifecycleError};
pub use session::{ModemSession, SessionError, SessionState};
