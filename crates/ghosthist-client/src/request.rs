//! Requests toward the collaborator and their argument encoding

use std::path::PathBuf;

/// Ask for ranked completions of `prefix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub prefix: String,
    pub cwd: PathBuf,
    pub limit: usize,
    /// Most recently executed command
    pub last_cmd: Option<String>,
    /// The command before `last_cmd`
    pub prev_cmd: Option<String>,
    /// Budget the collaborator should honour on its side
    pub timeout_ms: Option<u64>,
}

impl PredictRequest {
    pub fn new(prefix: impl Into<String>, cwd: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            prefix: prefix.into(),
            cwd: cwd.into(),
            limit,
            last_cmd: None,
            prev_cmd: None,
            timeout_ms: None,
        }
    }

    pub fn with_history(mut self, last_cmd: Option<String>, prev_cmd: Option<String>) -> Self {
        self.last_cmd = last_cmd;
        self.prev_cmd = prev_cmd;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "predict".to_string(),
            format!("--prefix={}", self.prefix),
            format!("--cwd={}", self.cwd.display()),
            format!("--limit={}", self.limit),
        ];
        push_opt(&mut args, "last-cmd", self.last_cmd.as_ref());
        push_opt(&mut args, "prev-cmd", self.prev_cmd.as_ref());
        push_opt(&mut args, "timeout-ms", self.timeout_ms.as_ref());
        args.push("--plain".to_string());
        args
    }
}

/// Metadata of one executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRequest {
    pub cmd: String,
    pub cwd: PathBuf,
    pub exit_status: Option<i32>,
    pub duration_ms: Option<u64>,
    /// Unix epoch seconds
    pub start_time: Option<u64>,
    pub session_id: Option<u32>,
    pub prev_cmd: Option<String>,
    pub prev2_cmd: Option<String>,
}

impl StoreRequest {
    pub fn new(cmd: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            cmd: cmd.into(),
            cwd: cwd.into(),
            exit_status: None,
            duration_ms: None,
            start_time: None,
            session_id: None,
            prev_cmd: None,
            prev2_cmd: None,
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "store".to_string(),
            format!("--cmd={}", self.cmd),
            format!("--cwd={}", self.cwd.display()),
        ];
        push_opt(&mut args, "exit-status", self.exit_status.as_ref());
        push_opt(&mut args, "duration-ms", self.duration_ms.as_ref());
        push_opt(&mut args, "start-time", self.start_time.as_ref());
        push_opt(&mut args, "session-id", self.session_id.as_ref());
        push_opt(&mut args, "prev-cmd", self.prev_cmd.as_ref());
        push_opt(&mut args, "prev2-cmd", self.prev2_cmd.as_ref());
        args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub pattern: String,
    pub limit: usize,
    pub dir: Option<PathBuf>,
}

impl SearchRequest {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["search".to_string(), format!("--limit={}", self.limit)];
        if let Some(dir) = &self.dir {
            args.push(format!("--dir={}", dir.display()));
        }
        args.push("--plain".to_string());
        args.push("--".to_string());
        args.push(self.pattern.clone());
        args
    }
}

/// Restrict frecent results to one kind of path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directories,
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrecentRequest {
    pub terms: Vec<String>,
    pub kind: Option<PathKind>,
    pub limit: usize,
}

impl FrecentRequest {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["frecent".to_string(), format!("--limit={}", self.limit)];
        match self.kind {
            Some(PathKind::Directories) => args.push("--dirs".to_string()),
            Some(PathKind::Files) => args.push("--files".to_string()),
            None => {}
        }
        args.push("--plain".to_string());
        if !self.terms.is_empty() {
            args.push("--".to_string());
            args.extend(self.terms.iter().cloned());
        }
        args
    }
}

fn push_opt<T: std::fmt::Display>(args: &mut Vec<String>, name: &str, value: Option<&T>) {
    if let Some(value) = value {
        args.push(format!("--{name}={value}"));
    }
}
