// Configuration inspection

use std::path::PathBuf;

use ghosthist_config::{ConfigManager, GhosthistConfig};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write the defaults to the config file
    Init { force: bool },
}

/// Manage configuration
pub struct ConfigCommand {
    action: ConfigAction,
    manager: ConfigManager,
    effective: GhosthistConfig,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, manager: ConfigManager, effective: GhosthistConfig) -> Self {
        Self {
            action,
            manager,
            effective,
        }
    }

    fn init(&self, force: bool) -> CliResult<PathBuf> {
        let path = self.manager.config_path().to_path_buf();
        if path.exists() && !force {
            return Err(crate::CliError::InvalidArgument {
                message: format!("{} already exists (use --force to overwrite)", path.display()),
            });
        }
        self.manager.save(&GhosthistConfig::default())?;
        Ok(path)
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => print!("{}", self.effective.to_toml_string()?),
            ConfigAction::Path => println!("{}", self.manager.config_path().display()),
            ConfigAction::Init { force } => {
                let path = self.init(*force)?;
                let style = OutputStyle::default();
                println!("{}", style.success(&format!("Wrote {}", path.display())));
            }
        }
        Ok(())
    }
}
