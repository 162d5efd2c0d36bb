//! Tracing setup
//!
//! `GHOSTHIST_LOG` takes an `EnvFilter` directive and wins over the
//! `--verbose`/`--quiet` flags.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

pub const LOG_ENV: &str = "GHOSTHIST_LOG";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Used while the interactive host owns the terminal
    File(PathBuf),
}

/// Default filter directive for the verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

pub fn init_logging(verbose: bool, quiet: bool, target: &LogTarget) -> CliResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    result.map_err(|e| CliError::Logging(e.to_string()))
}

fn open_log_file(path: &Path) -> CliResult<std::fs::File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "info");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(true, true), "error");
    }

    #[test]
    fn test_log_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ghosthist.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
