/// Configuration inspection commands
pub mod config;
/// Modem session commands
pub mod modem;
