//! Common utilities and abstractions for services

/// Reactive property system for single-writer state
pub mod property;

pub use property::Property;
