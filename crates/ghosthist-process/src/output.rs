//! Captured result of a completed call

use std::process::ExitStatus;

use crate::error::{ProcessError, Result};

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// True when the process exited with status zero
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, if the process exited normally
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Stdout decoded as UTF-8
    pub fn stdout_utf8(&self) -> Result<&str> {
        std::str::from_utf8(&self.stdout).map_err(|_| ProcessError::InvalidOutput)
    }

    /// Stderr decoded lossily, for diagnostics
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim_end().to_string()
    }
}
