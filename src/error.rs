//! Error types for fly-resource operations.
//!
//! This module defines [`FlyError`], the error type returned by every
//! operation in the crate, and a [`Result`] alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each failure class (precondition, launch, exit, network, decode,
//!   filesystem) gets its own variant so callers can match on it
//! - Nothing is retried; errors propagate to the caller immediately
//! - Use `anyhow::Error` (via `FlyError::Other`) for injected or unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fly-resource operations.
#[derive(Debug, Error)]
pub enum FlyError {
    /// An operation was attempted without a target.
    #[error("target cannot be empty")]
    EmptyTarget,

    /// The fly binary could not be started.
    #[error("Failed to launch {}: {source}", .binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fly binary ran but exited unsuccessfully.
    ///
    /// `stdout` holds whatever was captured before the process exited.
    #[error("fly {command} exited with code {code:?}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: Vec<u8>,
        stderr: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A request to the target failed at the transport level.
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The target answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// A response or command output was not the expected JSON.
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `set-pipeline` variable could not be encoded as JSON.
    #[error("Failed to encode value of var '{name}': {source}")]
    VarEncode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A bare fly binary name could not be found on PATH.
    #[error("Unable to find fly binary {} on PATH: {source}", .binary.display())]
    BinaryNotFound {
        binary: PathBuf,
        #[source]
        source: which::Error,
    },

    /// The replacement fly binary could not be opened for writing.
    #[error("Unable to open fly binary at {}: {source}", .path.display())]
    BinaryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded fly binary could not be written or installed.
    #[error("Unable to update fly binary at {}: {source}", .path.display())]
    BinaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" - {}", trimmed)
    }
}

impl FlyError {
    /// Captured stdout for a failed command, if any.
    pub fn partial_output(&self) -> Option<&[u8]> {
        match self {
            FlyError::CommandFailed { stdout, .. } => Some(stdout.as_slice()),
            _ => None,
        }
    }
}

/// Result type alias for fly-resource operations.
pub type Result<T> = std::result::Result<T, FlyError>;
