//! Subprocess call configuration

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ProcessError, Result};

/// Configuration for one collaborator call
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Executable, either a bare name resolved through `PATH` or a path
    pub program: String,
    /// Arguments, passed verbatim (no shell interpretation)
    pub args: Vec<String>,
    /// Working directory (None = inherit)
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables on top of the parent environment
    pub env: HashMap<String, String>,
    /// Hard timeout for the whole call (None = unbounded)
    pub timeout: Option<Duration>,
    /// Capture stdout instead of discarding it
    pub capture_stdout: bool,
    /// Capture stderr instead of discarding it
    pub capture_stderr: bool,
    /// Share the terminal with the parent: inherited stdio, same process group
    pub interactive: bool,
    /// Kill the process group when the handle is dropped before exit
    pub kill_on_drop: bool,
}

impl ProcessConfig {
    /// Create a configuration for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
            capture_stdout: true,
            capture_stderr: true,
            interactive: false,
            kill_on_drop: true,
        }
    }

    /// Set arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set working directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the hard timeout
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the hard timeout in milliseconds
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Enable/disable stdout capture
    pub fn capture_stdout(mut self, capture: bool) -> Self {
        self.capture_stdout = capture;
        self
    }

    /// Enable/disable stderr capture
    pub fn capture_stderr(mut self, capture: bool) -> Self {
        self.capture_stderr = capture;
        self
    }

    /// Run in the foreground of the controlling terminal
    ///
    /// Overrides the capture flags.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Whether dropping the handle of a running process kills it
    ///
    /// Ignored for interactive processes, which are never killed on drop.
    pub fn kill_on_drop(mut self, kill: bool) -> Self {
        self.kill_on_drop = kill;
        self
    }

    /// Reject configurations that can never run
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(ProcessError::InvalidConfig("program is empty".to_string()));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ProcessError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
