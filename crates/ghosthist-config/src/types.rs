//! Configuration sections

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GhosthistConfig {
    /// History collaborator calls
    pub predictor: PredictorConfig,
    /// Ghost-text behaviour
    pub suggestion: SuggestionConfig,
    /// Post-execution command logging
    pub logger: LoggerConfig,
    /// Key combo overrides
    pub keybinds: KeybindConfig,
}

/// How the collaborator is reached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictorConfig {
    /// Collaborator executable, resolved through `PATH`
    pub program: String,
    /// Candidates requested per prediction
    pub limit: usize,
    /// Hard client-side timeout for a prediction call
    pub timeout_ms: u64,
    /// Budget handed to the collaborator via `--timeout-ms`
    pub daemon_timeout_ms: u64,
    /// Seconds before a failed liveness probe is retried
    pub probe_interval_secs: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            program: "histctl".to_string(),
            limit: 5,
            timeout_ms: 150,
            daemon_timeout_ms: 100,
            probe_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestionConfig {
    pub enabled: bool,
    /// Buffers shorter than this (in characters) never trigger a request
    pub min_prefix_length: usize,
    pub style: SuggestionStyle,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_prefix_length: 2,
            style: SuggestionStyle::default(),
        }
    }
}

/// Ghost text appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestionStyle {
    /// ANSI 256-colour index for the foreground
    pub fg: u8,
    pub italic: bool,
}

impl Default for SuggestionStyle {
    fn default() -> Self {
        Self {
            fg: 8,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    /// Glob patterns; a matching command is neither timed nor stored
    pub ignore_patterns: Vec<String>,
    /// Timeout for the detached store call
    pub store_timeout_ms: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_patterns: vec![" *".to_string()],
            store_timeout_ms: 2000,
        }
    }
}

/// Key combo (`"ctrl+e"`) to widget or action name (`"accept-suggestion"`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct KeybindConfig {
    pub bindings: BTreeMap<String, String>,
}

impl GhosthistConfig {
    /// Render as TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
