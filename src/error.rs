//! Error types for rigger operations.
//!
//! This module defines [`RiggerError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RiggerError` for failures of rigger itself (config, input, spawning)
//! - Step actions return `anyhow::Result<()>`; their errors never become a
//!   `RiggerError` but are recorded as outcomes in the run log
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rigger operations.
#[derive(Debug, Error)]
pub enum RiggerError {
    /// Step file not found at expected location.
    #[error("Step file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse step file.
    #[error("Failed to parse step file at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid step file structure or values.
    #[error("Invalid step file: {message}")]
    ConfigValidationError { message: String },

    /// A step name that is not defined in the step file.
    #[error("Unknown step: {name}")]
    UnknownStep { name: String },

    /// Shell command exited non-zero or was killed.
    #[error("`{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A command could not be started at all.
    #[error("Failed to run {command}: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    /// The confirmation input stream reached end of file.
    #[error("Confirmation input closed while asking about '{step}'")]
    InputClosed { step: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RiggerError {
    /// Whether this error comes from the confirmation mechanism itself.
    pub fn is_runner_failure(&self) -> bool {
        matches!(self, Self::InputClosed { .. } | Self::Io(_))
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type alias for rigger operations.
pub type Result<T> = std::result::Result<T, RiggerError>;
