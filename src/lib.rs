//! modemd - GSM/PPP modem lifecycle daemon.
//!
//! Powers a cellular modem up through two GPIO lines, runs its PPP data
//! session as a strict two-state machine, and tracks layer-4 connectivity
//! from network stack events. Operators suspend and resume the session with
//! console commands.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use modemd::{
//!     config::Config,
//!     services::{
//!         LifecycleController,
//!         gpio::SimulatedGpioBus,
//!         network::SimulatedStack,
//!     },
//! };
//!
//! # async fn run() -> modemd::Result<()> {
//! let config = Config::load()?.validate()?;
//! let controller = LifecycleController::boot(
//!     config,
//!     Arc::new(SimulatedGpioBus::new()),
//!     Arc::new(SimulatedStack::default()),
//! )
//! .await?;
//!
//! controller.suspend().await.ok();
//! println!("session: {}", controller.session_state());
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Operator command dispatcher.
pub mod cli;

/// Hardware, session and connectivity services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{ModemdError, Result};
