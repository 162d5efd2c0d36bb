//! Configuration loading, validation and persistence

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use globset::Glob;
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::GhosthistConfig,
};

const DEFAULT_ENV_PREFIX: &str = "GHOSTHIST";

/// Configuration manager
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    env_prefix: String,
}

impl ConfigManager {
    /// Manager reading the default config file location
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Manager reading a specific config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `~/.config/ghosthist/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghosthist")
            .join("config.toml")
    }

    /// `~/.local/share/ghosthist/ghosthist.log`
    pub fn default_log_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ghosthist")
            .join("ghosthist.log")
    }

    /// Load defaults, then the file (if present), then the environment
    pub fn load(&self) -> Result<GhosthistConfig> {
        debug!(path = %self.config_path.display(), prefix = %self.env_prefix, "Loading configuration");

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("logger.ignore_patterns"),
            );

        let config: GhosthistConfig = builder.build()?.try_deserialize()?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Write the configuration to the config file, creating its directory
    pub fn save(&self, config: &GhosthistConfig) -> Result<()> {
        let toml = config.to_toml_string()?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    pub fn validate(&self, config: &GhosthistConfig) -> Result<()> {
        if config.predictor.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "predictor.program must not be empty".to_string(),
            ));
        }
        if config.predictor.limit == 0 {
            return Err(ConfigError::Validation(
                "predictor.limit must be greater than 0".to_string(),
            ));
        }
        if config.predictor.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "predictor.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if config.suggestion.min_prefix_length == 0 {
            return Err(ConfigError::Validation(
                "suggestion.min_prefix_length must be greater than 0".to_string(),
            ));
        }
        for pattern in &config.logger.ignore_patterns {
            Glob::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("logger.ignore_patterns: {pattern:?}: {e}"))
            })?;
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
