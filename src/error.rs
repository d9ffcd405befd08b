//! Error types for the folder-print monitor.
//!
//! Only [`ConfigError`] at startup is fatal. Everything else is reported by
//! the control loop and retried on a later cycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors related to the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Settings file is not valid JSON or has fields of the wrong type.
    #[error("Failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A field parsed but holds a value the monitor cannot use.
    #[error("Invalid value for field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised when invoking the print subsystem.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The external program could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: io::Error,
    },
}

/// Reasons the target folder cannot be scanned.
#[derive(Debug, Error)]
pub enum FolderError {
    #[error("Target folder '{}' does not exist", path.display())]
    Missing { path: PathBuf },

    #[error("Target folder '{}' is not a directory", path.display())]
    NotDirectory { path: PathBuf },

    #[error("Target folder '{}' is not readable: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
}

/// Reasons no printer is usable for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    /// The system default could not be determined.
    #[error("No default printer found: {detail}")]
    NoDefault { detail: String },

    /// Explicit mode is selected but no name is configured.
    #[error("Explicit printer name is empty in settings")]
    ExplicitNameMissing,

    /// The printer exists in settings but the status query rejected it.
    #[error("Printer '{printer}' is NOT available: {detail}")]
    NotReady { printer: String, detail: String },
}
