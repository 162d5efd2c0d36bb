//! Post-execution command logging
//!
//! `preexec` runs when a command starts, `precmd` when the next prompt is
//! about to be drawn. The store request is dispatched fire-and-forget: the
//! logger never learns whether it arrived.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use ghosthist_client::{CommandStore, StoreRequest};
use ghosthist_config::LoggerConfig;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, trace};

use crate::error::Result;

/// Commands that are neither timed nor stored
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    set: GlobSet,
    patterns: Vec<String>,
}

impl IgnorePatterns {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: builder.build()?,
            patterns,
        })
    }

    /// Ignore nothing
    pub fn none() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Match against the command exactly as typed
    pub fn is_ignored(&self, command: &str) -> bool {
        self.set.is_match(command)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Timing state between `preexec` and `precmd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandStart {
    /// No command ran since the last prompt
    #[default]
    Idle,
    /// A command ran but matched an ignore pattern
    Untracked,
    Started(SystemTime),
}

/// Per-session bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Stable for the life of the host process
    pub session_id: u32,
    pub last_command: Option<String>,
    pub previous_command: Option<String>,
    pub start: CommandStart,
}

impl SessionState {
    pub fn new(session_id: u32) -> Self {
        Self {
            session_id,
            last_command: None,
            previous_command: None,
            start: CommandStart::Idle,
        }
    }
}

pub struct CommandLogger<S> {
    store: S,
    ignore: IgnorePatterns,
    enabled: bool,
    session: SessionState,
}

impl<S> CommandLogger<S> {
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_id(&self) -> u32 {
        self.session.session_id
    }

    pub fn last_command(&self) -> Option<&str> {
        self.session.last_command.as_deref()
    }

    pub fn previous_command(&self) -> Option<&str> {
        self.session.previous_command.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<S: CommandStore> CommandLogger<S> {
    pub fn new(store: S, ignore: IgnorePatterns, session_id: u32) -> Self {
        Self {
            store,
            ignore,
            enabled: true,
            session: SessionState::new(session_id),
        }
    }

    pub fn from_config(store: S, config: &LoggerConfig, session_id: u32) -> Result<Self> {
        let ignore = IgnorePatterns::new(config.ignore_patterns.iter().cloned())?;
        let mut logger = Self::new(store, ignore, session_id);
        logger.enabled = config.enabled;
        Ok(logger)
    }

    /// A command is about to run
    pub fn preexec(&mut self, command: &str, now: SystemTime) {
        self.session.start = if self.ignore.is_ignored(command) {
            trace!("Command matches an ignore pattern, not timing it");
            CommandStart::Untracked
        } else {
            CommandStart::Started(now)
        };
    }

    /// The prompt is about to be drawn after a command finished
    ///
    /// `history_last` is the editor's own most recent history entry, which
    /// may differ from what `preexec` saw (history expansion). Returns whether
    /// a store request was dispatched.
    pub fn precmd(
        &mut self,
        exit_status: i32,
        now: SystemTime,
        history_last: Option<&str>,
        cwd: &Path,
    ) -> bool {
        let started_at = match std::mem::take(&mut self.session.start) {
            CommandStart::Idle => return false,
            CommandStart::Untracked => {
                debug!("Skipping ignored command");
                return false;
            }
            CommandStart::Started(at) => at,
        };

        let duration_ms = match now.duration_since(started_at) {
            Ok(elapsed) => elapsed.as_millis() as u64,
            Err(_) => {
                debug!("Clock went backwards, clamping duration to zero");
                0
            }
        };

        let Some(command) = history_last.map(str::trim_start).filter(|c| !c.is_empty()) else {
            return false;
        };

        let request = StoreRequest {
            cmd: command.to_string(),
            cwd: cwd.to_path_buf(),
            exit_status: Some(exit_status),
            duration_ms: Some(duration_ms),
            start_time: started_at
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|since| since.as_secs()),
            session_id: Some(self.session.session_id),
            prev_cmd: self.session.last_command.clone(),
            prev2_cmd: self.session.previous_command.clone(),
        };

        if self.enabled {
            debug!(command = %request.cmd, exit_status, duration_ms, "Dispatching store request");
            self.store.dispatch(request);
        }

        self.session.previous_command = self.session.last_command.replace(command.to_string());
        self.enabled
    }
}
