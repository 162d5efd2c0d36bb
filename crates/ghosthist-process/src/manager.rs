//! Process manager - bounded and detached collaborator calls

use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{
    child::ManagedChild,
    config::ProcessConfig,
    error::{ProcessError, Result},
    output::ProcessOutput,
};

/// Spawns collaborator processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessManager;

impl ProcessManager {
    /// Create new process manager
    pub fn new() -> Self {
        Self
    }

    /// Spawn a managed process
    ///
    /// Unless the config is interactive, the child gets its own process
    /// group on unix so that a timeout kill reaches anything it forks.
    ///
    /// # Examples
    /// ```no_run
    /// use ghosthist_process::{ProcessManager, ProcessConfig};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let manager = ProcessManager::new();
    /// let config = ProcessConfig::new("histctl").args(["ping"]);
    /// let mut child = manager.spawn(config).await?;
    /// child.wait().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn spawn(&self, config: ProcessConfig) -> Result<ManagedChild> {
        config.validate()?;
        debug!(
            program = %config.program,
            args = ?config.args,
            "Spawning process"
        );

        let child = build_command(&config).spawn()?;
        let pid = child.id().ok_or_else(|| {
            ProcessError::SpawnFailed(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Failed to get process ID",
            ))
        })?;

        debug!(pid = %pid, program = %config.program, "Process spawned");

        Ok(ManagedChild::new(child, config))
    }

    /// Run a process to completion and capture its output
    ///
    /// When the configured timeout elapses first the whole process group is
    /// killed immediately and [`ProcessError::Timeout`] is returned. A non-zero
    /// exit is not an error here; callers inspect [`ProcessOutput::status`].
    pub async fn output(&self, config: ProcessConfig) -> Result<ProcessOutput> {
        let timeout = config.timeout;
        let mut child = self.spawn(config).await?;
        let stdout = child.stdout();
        let stderr = child.stderr();

        let collect = async {
            let (status, stdout, stderr) =
                tokio::join!(child.wait_unbounded(), read_stream(stdout), read_stream(stderr));
            Ok::<_, ProcessError>(ProcessOutput {
                status: status?,
                stdout: stdout?,
                stderr: stderr?,
            })
        };

        let Some(limit) = timeout else {
            return collect.await;
        };
        match tokio::time::timeout(limit, collect).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    pid = %child.pid(),
                    program = %child.config().program,
                    timeout_ms = limit.as_millis() as u64,
                    "Process exceeded its timeout, killing"
                );
                child.kill_now();
                Err(ProcessError::timeout(limit))
            }
        }
    }

    /// Fire-and-forget: start the process on a background task and return
    ///
    /// Nothing is reported back to the caller. The outcome (exit status, spawn
    /// failure, timeout) is only logged at debug level. Output is discarded.
    /// Outside a tokio runtime the call is dropped.
    pub fn spawn_detached(&self, config: ProcessConfig) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!(program = %config.program, "No async runtime, detached call dropped");
                return;
            }
        };

        let manager = *self;
        let config = config
            .capture_stdout(false)
            .capture_stderr(false)
            .kill_on_drop(false);
        handle.spawn(async move {
            let program = config.program.clone();
            let mut child = match manager.spawn(config).await {
                Ok(child) => child,
                Err(e) => {
                    debug!(program = %program, error = %e, "Detached call failed to start");
                    return;
                }
            };

            match child.wait().await {
                Ok(status) => {
                    debug!(program = %program, status = %status, "Detached call finished")
                }
                Err(e) => {
                    debug!(program = %program, error = %e, "Detached call abandoned");
                    child.kill_now();
                }
            }
        });
    }
}

fn build_command(config: &ProcessConfig) -> Command {
    let mut cmd = Command::new(&config.program);
    cmd.args(&config.args);

    if let Some(ref dir) = config.working_dir {
        cmd.current_dir(dir);
    }
    for (key, value) in &config.env {
        cmd.env(key, value);
    }

    if config.interactive {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        return cmd;
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(if config.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stderr(if config.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    #[cfg(unix)]
    cmd.process_group(0);

    cmd
}

async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
