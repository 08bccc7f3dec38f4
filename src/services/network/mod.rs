//! Network/PPP stack capability.
//!
//! The session state machine starts and stops the stack; the connectivity
//! observer subscribes to its events. `pppd` and a simulation implement it.

mod error;
mod pppd;
mod simulated;
mod stack;
mod types;

pub use error::StackError;
pub use pppd::PppdStack;
pub use simulated::{SimulatedStack, StackCall};
pub use stack::{EventStream, NetworkStack, subscribe};
pub use types::{ConnectivityStatus, NetEvent, NetEventKind, NetEventMask};
