//! Running accepted lines
//!
//! `cd` and `exit` are handled in-process so the working directory survives
//! between commands; everything else runs through the user's shell in the
//! foreground of the terminal.

use std::env;
use std::path::{Path, PathBuf};

use ghosthist_process::{ProcessConfig, ProcessManager};
use tracing::{debug, warn};

/// Shells that do not take POSIX `-c` command strings reliably
const SHELL_BLACKLIST: &[&str] = &["fish", "nu"];

/// Exit status reported when the shell cannot be started
const SPAWN_FAILED_STATUS: i32 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand<'a> {
    Empty,
    Exit,
    /// `cd` with its optional target
    ChangeDir(Option<&'a str>),
    External(&'a str),
}

pub fn classify(line: &str) -> LineCommand<'_> {
    let trimmed = line.trim();
    let mut words = trimmed.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (None, _, _) => LineCommand::Empty,
        (Some("exit"), None, _) => LineCommand::Exit,
        (Some("cd"), target, None) => LineCommand::ChangeDir(target),
        _ => LineCommand::External(trimmed),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(i32),
    Exit,
}

pub struct ShellRunner {
    shell: String,
    manager: ProcessManager,
    previous_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            manager: ProcessManager::new(),
            previous_dir: None,
        }
    }

    /// `$SHELL` unless it is blacklisted, else bash, else `/bin/sh`
    pub fn detect() -> Self {
        Self::new(acceptable_shell(env::var("SHELL").ok()))
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub async fn run(&mut self, line: &str) -> RunOutcome {
        match classify(line) {
            LineCommand::Empty => RunOutcome::Finished(0),
            LineCommand::Exit => RunOutcome::Exit,
            LineCommand::ChangeDir(target) => RunOutcome::Finished(self.change_dir(target)),
            LineCommand::External(command) => RunOutcome::Finished(self.run_external(command).await),
        }
    }

    fn change_dir(&mut self, target: Option<&str>) -> i32 {
        let Ok(cwd) = env::current_dir() else {
            eprintln!("cd: current directory is gone");
            return 1;
        };
        let home = dirs::home_dir();
        let Some(dest) = resolve_dir(target, &cwd, home.as_deref(), self.previous_dir.as_deref())
        else {
            eprintln!("cd: no such directory");
            return 1;
        };

        match env::set_current_dir(&dest) {
            Ok(()) => {
                debug!(from = %cwd.display(), to = %dest.display(), "Changed directory");
                self.previous_dir = Some(cwd);
                0
            }
            Err(e) => {
                eprintln!("cd: {}: {}", dest.display(), e);
                1
            }
        }
    }

    async fn run_external(&self, command: &str) -> i32 {
        let mut config = ProcessConfig::new(&self.shell)
            .args(["-c", command])
            .interactive(true);
        if let Ok(cwd) = env::current_dir() {
            config = config.working_dir(cwd);
        }

        let mut child = match self.manager.spawn(config).await {
            Ok(child) => child,
            Err(e) => {
                warn!(shell = %self.shell, error = %e, "Failed to start shell");
                eprintln!("ghosthist: {}: {}", self.shell, e);
                return SPAWN_FAILED_STATUS;
            }
        };

        // The terminal sends SIGINT to our group too; only the child should die
        loop {
            tokio::select! {
                status = child.wait() => {
                    return match status {
                        Ok(status) => exit_code(status),
                        Err(e) => {
                            warn!(error = %e, "Lost track of command");
                            1
                        }
                    };
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!(pid = child.pid(), "Interrupt delivered to foreground command");
                }
            }
        }
    }
}

/// Target of `cd`, like a POSIX shell: no argument is home, `-` is the
/// previous directory, `~/` expands to home
pub fn resolve_dir(
    target: Option<&str>,
    cwd: &Path,
    home: Option<&Path>,
    previous: Option<&Path>,
) -> Option<PathBuf> {
    match target {
        None | Some("~") => home.map(Path::to_path_buf),
        Some("-") => previous.map(Path::to_path_buf),
        Some(path) => match path.strip_prefix("~/") {
            Some(rest) => home.map(|home| home.join(rest)),
            None => Some(cwd.join(path)),
        },
    }
}

fn acceptable_shell(shell: Option<String>) -> String {
    if let Some(shell) = shell {
        let basename = Path::new(&shell)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if !SHELL_BLACKLIST.contains(&basename) {
            return shell;
        }
        debug!(shell = %shell, "Skipping blacklisted SHELL");
    }

    match which::which("bash") {
        Ok(bash) => bash.to_string_lossy().into_owned(),
        Err(_) => "/bin/sh".to_string(),
    }
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
