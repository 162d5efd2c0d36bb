// CLI error type and user-facing messages

use ghosthist_client::ClientError;
use ghosthist_completion::CompletionError;
use ghosthist_config::ConfigError;
use ghosthist_keybinds::KeybindError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid keybinding: {0}")]
    Keybind(#[from] KeybindError),

    #[error("Invalid suggestion settings: {0}")]
    Completion(#[from] CompletionError),

    #[error("History collaborator error: {0}")]
    Client(#[from] ClientError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Message for the terminal, with a hint where one helps
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'ghosthist --help' for usage information.", message)
            }
            CliError::Io(e) => format!("I/O failed: {}", e),
            CliError::Config(e) => {
                format!("Configuration error: {}\n\nRun 'ghosthist config path' to find the file.", e)
            }
            CliError::Keybind(e) => {
                format!("Invalid keybinding: {}\n\nCheck the [keybinds] section of your configuration.", e)
            }
            CliError::Completion(e) => format!("Invalid suggestion settings: {}", e),
            CliError::Client(ClientError::Unavailable(reason)) => {
                format!("not running ({})", reason)
            }
            CliError::Client(e) => format!("History collaborator error: {}", e),
            CliError::Logging(msg) => format!("Logging setup failed: {}", msg),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
