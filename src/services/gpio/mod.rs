//! GPIO capability.
//!
//! The power sequencer only ever talks to a [`GpioBus`]: bind a controller by
//! label, then configure and drive pins on the returned [`GpioPort`]. Linux
//! sysfs and an in-memory simulation implement it.

mod bus;
mod error;
mod simulated;
mod sysfs;
mod types;

pub use bus::{GpioBus, GpioPort};
pub use error::HardwareError;
pub use simulated::{GpioOperation, SimulatedGpioBus};
pub use sysfs::SysfsGpioBus;
pub use types::{Direction, Level};
