//! Managed child process wrapper

use tokio::process::Child;
use tracing::debug;

use crate::{
    config::ProcessConfig,
    error::{ProcessError, Result},
};

/// A spawned collaborator process
pub struct ManagedChild {
    child: Child,
    config: ProcessConfig,
    pid: u32,
}

impl ManagedChild {
    pub(crate) fn new(child: Child, config: ProcessConfig) -> Self {
        let pid = child.id().unwrap_or(0);
        Self { child, config, pid }
    }

    /// Get process ID
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get process configuration
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Check if process is still running
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Wait for exit, bounded by the configured timeout
    ///
    /// On timeout the child is left running; callers decide whether to kill.
    pub async fn wait(&mut self) -> Result<std::process::ExitStatus> {
        match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.child.wait())
                .await
                .map_err(|_| ProcessError::timeout(timeout))?
                .map_err(Into::into),
            None => self.wait_unbounded().await,
        }
    }

    pub(crate) async fn wait_unbounded(&mut self) -> Result<std::process::ExitStatus> {
        self.child.wait().await.map_err(Into::into)
    }

    /// Kill the process (its whole group unless interactive) without waiting
    ///
    /// The runtime reaps the child in the background.
    pub fn kill_now(&mut self) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{killpg, Signal};
            use nix::unistd::Pid;

            if !self.config.interactive
                && killpg(Pid::from_raw(self.pid as i32), Signal::SIGKILL).is_ok()
            {
                return;
            }
        }

        if let Err(e) = self.child.start_kill() {
            debug!(pid = %self.pid, error = %e, "Process already gone");
        }
    }

    /// Take stdout handle
    pub fn stdout(&mut self) -> Option<tokio::process::ChildStdout> {
        self.child.stdout.take()
    }

    /// Take stderr handle
    pub fn stderr(&mut self) -> Option<tokio::process::ChildStderr> {
        self.child.stderr.take()
    }
}

impl Drop for ManagedChild {
    fn drop(&mut self) {
        if self.config.kill_on_drop && !self.config.interactive && self.is_running() {
            debug!(pid = %self.pid, program = %self.config.program, "Handle dropped, killing process");
            self.kill_now();
        }
    }
}
