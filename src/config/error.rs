use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::services::power::LineRole;

/// Errors raised while loading or validating the daemon configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A power line has no pin assignment in the board description
    #[error("no GPIO pin assigned for the {role} line (expected a [gpio.{key}] table)")]
    MissingPinAssignment {
        /// Line that has no assignment
        role: LineRole,
        /// Config table the assignment is read from
        key: &'static str,
    },

    /// Configuration field present but invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// Merged configuration does not match the schema
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// I/O operation error on a known path
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Import operation error with file context
    #[error("failed to import '{path}': {details}")]
    ImportError {
        /// Path of file being imported
        path: PathBuf,
        /// Import error details
        details: String,
    },
}

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => p.to_string_lossy().to_string(),
            None => "string".to_string(),
        };

        ConfigError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an import error with file path context.
    pub fn import(error: impl fmt::Display, path: &Path) -> Self {
        ConfigError::ImportError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    pub(crate) fn invalid_field(component: &str, field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfigField {
            field: field.to_string(),
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}
