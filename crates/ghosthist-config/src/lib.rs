//! ghosthist configuration
//!
//! Settings are layered: built-in defaults, then the optional TOML file at
//! `~/.config/ghosthist/config.toml`, then `GHOSTHIST_*` environment variables
//! (`GHOSTHIST_PREDICTOR__LIMIT=3`, `GHOSTHIST_SUGGESTION__ENABLED=false`).

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    GhosthistConfig, KeybindConfig, LoggerConfig, PredictorConfig, SuggestionConfig,
    SuggestionStyle,
};
