//! GPIO power sequencer.
//!
//! Brings the modem hardware into a powered, addressable state: SIM
//! selection first, then modem power, then the settle delay.

mod line;
mod sequencer;

pub use line::{LineRole, PowerLine};
pub use sequencer::PowerSequencer;
