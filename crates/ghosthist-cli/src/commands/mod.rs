// Command handlers for the ghosthist CLI

pub mod config;
pub mod search;
pub mod shell;
pub mod status;
pub mod suggest;

pub use config::{ConfigAction, ConfigCommand};
pub use search::{FrecentCommand, SearchCommand};
pub use shell::ShellCommand;
pub use status::StatusCommand;
pub use suggest::SuggestCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self) -> CliResult<()>;
}
