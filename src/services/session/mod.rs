//! Modem session state machine.
//!
//! Tracks whether the PPP session is running and serializes every start/stop
//! request through a single lock.

mod error;
mod machine;

pub use error::SessionError;
pub use machine::{ModemSession, SessionState};
