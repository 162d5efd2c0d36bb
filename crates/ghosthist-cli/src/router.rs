// Command routing and dispatch

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ghosthist_client::{CliClient, PathKind};
use ghosthist_config::ConfigManager;
use tracing::debug;

use crate::commands::*;
use crate::error::CliResult;
use crate::logging::{init_logging, LogTarget};

/// ghosthist - history-driven ghost-text suggestions for the command line
#[derive(Parser, Debug)]
#[command(name = "ghosthist")]
#[command(bin_name = "ghosthist")]
#[command(about = "History-driven ghost-text suggestions for the command line")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive line editor with suggestions
    #[command(about = "Start an interactive line editor with ghost-text suggestions")]
    Shell,

    /// Print the suggestion for a buffer
    #[command(about = "Run one suggestion request and print the suggested command")]
    Suggest {
        /// Buffer contents to complete
        #[arg(long, value_name = "TEXT")]
        buffer: String,

        /// Working directory sent with the request (default: current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },

    /// Check whether the history collaborator answers
    #[command(about = "Report whether the history collaborator is running")]
    Status,

    /// Search the command history
    #[command(about = "Search recorded commands")]
    Search {
        #[arg(value_name = "PATTERN")]
        pattern: String,

        #[arg(long, default_value_t = search::DEFAULT_LIMIT)]
        limit: usize,

        /// Only commands run in this directory
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Rank recently and frequently used paths
    #[command(about = "List frecent directories and files")]
    Frecent {
        #[arg(value_name = "TERMS")]
        terms: Vec<String>,

        #[arg(long, conflicts_with = "files")]
        dirs: bool,

        #[arg(long)]
        files: bool,

        #[arg(long, default_value_t = search::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Inspect configuration
    #[command(about = "View and initialize ghosthist configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigSubcommand>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Where this command may write logs
    pub fn log_target(&self) -> LogTarget {
        match self {
            Commands::Shell => LogTarget::File(ConfigManager::default_log_path()),
            _ => LogTarget::Stderr,
        }
    }
}

/// Route commands to handlers
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();

        init_logging(cli.verbose, cli.quiet, &cli.command.log_target())?;

        Self::execute(&cli).await
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let config = manager.load()?;
        debug!(command = ?cli.command, "Routing command");

        match &cli.command {
            Commands::Shell => ShellCommand::new(config).execute().await,
            Commands::Suggest { buffer, cwd } => {
                let cwd = match cwd {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                let client = CliClient::from_config(&config);
                SuggestCommand::new(client, &config, buffer.clone(), cwd)
                    .execute()
                    .await
            }
            Commands::Status => {
                StatusCommand::new(Arc::new(CliClient::from_config(&config)))
                    .execute()
                    .await
            }
            Commands::Search {
                pattern,
                limit,
                dir,
            } => {
                SearchCommand::new(
                    CliClient::from_config(&config),
                    pattern.clone(),
                    *limit,
                    dir.clone(),
                )
                .execute()
                .await
            }
            Commands::Frecent {
                terms,
                dirs,
                files,
                limit,
            } => {
                FrecentCommand::new(
                    CliClient::from_config(&config),
                    terms.clone(),
                    path_kind(*dirs, *files),
                    *limit,
                )
                .execute()
                .await
            }
            Commands::Config { action } => {
                let action = match action {
                    Some(ConfigSubcommand::Show) | None => ConfigAction::Show,
                    Some(ConfigSubcommand::Path) => ConfigAction::Path,
                    Some(ConfigSubcommand::Init { force }) => ConfigAction::Init { force: *force },
                };
                ConfigCommand::new(action, manager, config)
                    .execute()
                    .await
            }
        }
    }
}

fn path_kind(dirs: bool, files: bool) -> Option<PathKind> {
    match (dirs, files) {
        (true, _) => Some(PathKind::Directories),
        (_, true) => Some(PathKind::Files),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ghosthist").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_suggest_args() {
        let cli = parse(&["suggest", "--buffer", "git st", "--cwd", "/srv"]);
        assert_eq!(
            cli.command,
            Commands::Suggest {
                buffer: "git st".to_string(),
                cwd: Some(PathBuf::from("/srv")),
            }
        );
    }

    #[test]
    fn test_search_defaults() {
        let cli = parse(&["search", "docker"]);
        assert_eq!(
            cli.command,
            Commands::Search {
                pattern: "docker".to_string(),
                limit: 20,
                dir: None,
            }
        );
    }

    #[test]
    fn test_frecent_kind() {
        let cli = parse(&["frecent", "src", "api", "--dirs", "--limit", "3"]);
        let Commands::Frecent { terms, dirs, files, limit } = cli.command else {
            panic!("expected frecent");
        };
        assert_eq!(terms, vec!["src", "api"]);
        assert_eq!(limit, 3);
        assert_eq!(path_kind(dirs, files), Some(PathKind::Directories));
        assert_eq!(path_kind(false, true), Some(PathKind::Files));
        assert_eq!(path_kind(false, false), None);
    }

    #[test]
    fn test_dirs_and_files_conflict() {
        let args = ["ghosthist", "frecent", "--dirs", "--files"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["status", "--verbose", "--config", "/tmp/g.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
    }

    #[test]
    fn test_only_shell_logs_to_file() {
        assert!(matches!(Commands::Shell.log_target(), LogTarget::File(_)));
        assert_eq!(Commands::Status.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn test_config_defaults_to_show() {
        let cli = parse(&["config"]);
        assert_eq!(cli.command, Commands::Config { action: None });
    }
}
