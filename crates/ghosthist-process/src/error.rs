//! Error types for subprocess calls

use std::io;
use thiserror::Error;

/// Subprocess errors
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be started
    #[error("Failed to spawn process: {0}")]
    SpawnFailed(#[from] io::Error),

    /// The call exceeded its hard timeout and the child was killed
    #[error("Process timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Captured output was not valid UTF-8
    #[error("Process output is not valid UTF-8")]
    InvalidOutput,

    /// Invalid configuration
    #[error("Invalid process configuration: {0}")]
    InvalidConfig(String),
}

impl ProcessError {
    pub(crate) fn timeout(duration: std::time::Duration) -> Self {
        ProcessError::Timeout {
            millis: duration.as_millis() as u64,
        }
    }
}

/// Result type for subprocess operations
pub type Result<T> = std::result::Result<T, ProcessError>;
