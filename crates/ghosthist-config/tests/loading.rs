//! Integration tests for layered configuration loading

use ghosthist_config::{ConfigError, ConfigManager, GhosthistConfig};
use proptest::prelude::*;
use tempfile::TempDir;

fn manager_in(dir: &TempDir, prefix: &str) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("config.toml")).with_env_prefix(prefix)
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = manager_in(&dir, "GHOSTHIST_TEST_MISSING").load().unwrap();

    assert_eq!(config, GhosthistConfig::default());
    assert_eq!(config.predictor.program, "histctl");
    assert_eq!(config.predictor.limit, 5);
    assert_eq!(config.suggestion.min_prefix_length, 2);
    assert_eq!(config.logger.ignore_patterns, vec![" *"]);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[predictor]\nlimit = 3\n\n[keybinds]\n\"ctrl+f\" = \"accept-word\"\n",
    )
    .unwrap();

    let config = manager_in(&dir, "GHOSTHIST_TEST_PARTIAL").load().unwrap();
    assert_eq!(config.predictor.limit, 3);
    assert_eq!(config.predictor.timeout_ms, 150);
    assert!(config.suggestion.enabled);
    assert_eq!(
        config.keybinds.bindings.get("ctrl+f").map(String::as_str),
        Some("accept-word")
    );
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[predictor]\nlimit = 3\n").unwrap();

    std::env::set_var("GHOSTHIST_TEST_ENV_PREDICTOR__LIMIT", "9");
    std::env::set_var("GHOSTHIST_TEST_ENV_SUGGESTION__ENABLED", "false");
    let config = manager_in(&dir, "GHOSTHIST_TEST_ENV").load().unwrap();
    std::env::remove_var("GHOSTHIST_TEST_ENV_PREDICTOR__LIMIT");
    std::env::remove_var("GHOSTHIST_TEST_ENV_SUGGESTION__ENABLED");

    assert_eq!(config.predictor.limit, 9);
    assert!(!config.suggestion.enabled);
}

#[test]
fn test_invalid_file_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[suggestion]\nmin_prefix_length = 0\n",
    )
    .unwrap();

    let result = manager_in(&dir, "GHOSTHIST_TEST_INVALID").load();
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[predictor\nlimit = ").unwrap();

    let result = manager_in(&dir, "GHOSTHIST_TEST_MALFORMED").load();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("nested").join("config.toml"))
        .with_env_prefix("GHOSTHIST_TEST_SAVE");

    let mut config = GhosthistConfig::default();
    config.predictor.program = "/opt/bin/histctl".to_string();
    config.logger.ignore_patterns = vec![" *".to_string(), "ls".to_string()];
    config
        .keybinds
        .bindings
        .insert("alt+f".to_string(), "accept-word".to_string());

    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);
}

proptest! {
    /// Any positive numeric settings survive validation
    #[test]
    fn prop_positive_settings_validate(
        limit in 1usize..100,
        timeout_ms in 1u64..10_000,
        min_prefix_length in 1usize..20,
    ) {
        let mut config = GhosthistConfig::default();
        config.predictor.limit = limit;
        config.predictor.timeout_ms = timeout_ms;
        config.suggestion.min_prefix_length = min_prefix_length;

        prop_assert!(ConfigManager::with_path("/unused").validate(&config).is_ok());
    }
}
