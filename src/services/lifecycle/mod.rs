//! Modem lifecycle controller.
//!
//! Boots the modem (power-up, session, connectivity observer) and exposes
//! suspend/resume to the operator command dispatcher.

mod controller;
mod error;

pub use controller::LifecycleController;
pub use error::LifecycleError;
