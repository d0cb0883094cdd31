//! Integration tests for configuration loading.

use std::fs;
use std::path::PathBuf;

use plank_config::{Config, ConfigError, LoggingConfig, StorageConfig};
use tempfile::TempDir;

#[tokio::test]
async fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plank.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Keep tasks next to the project
            storage: {
                data_dir: "./board-data",
            },
            logging: {
                level: "debug",
            },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert!(config.storage.persist);
    assert_eq!(config.storage.data_dir, Some(PathBuf::from("./board-data")));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, None);
}

#[tokio::test]
async fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        storage: StorageConfig::in_memory(),
        logging: LoggingConfig {
            level: "warn".to_string(),
            file: Some(dir.path().join("board.log")),
        },
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(loaded, original);
}

#[tokio::test]
async fn config_load_nonexistent_file_fails() {
    let result = Config::load_from("/nonexistent/path/plank.json");
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn config_rejects_unknown_log_level() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plank.json");
    fs::write(&config_path, r#"{ "logging": { "level": "loud" } }"#).unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLogLevel { .. }));
}

#[test]
fn config_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plank.json5");
    fs::write(&config_path, "{ storage: ").unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseJson5(_)));
}

#[test]
fn env_overrides_take_precedence_over_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("plank.json");
    fs::write(
        &config_path,
        r#"{ "storage": { "persist": true }, "logging": { "level": "info" } }"#,
    )
    .unwrap();

    let mut config = Config::load_from(&config_path).unwrap();
    config
        .apply_env_with(|name| match name {
            "PLANK_PERSIST" => Some("no".to_string()),
            "PLANK_LOG" => Some("trace".to_string()),
            "PLANK_DATA_DIR" => Some("/srv/plank".to_string()),
            _ => None,
        })
        .unwrap();

    assert!(!config.storage.persist);
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.storage.resolve_data_dir().unwrap(), PathBuf::from("/srv/plank"));
}

#[test]
fn log_file_defaults_into_data_dir() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        storage: StorageConfig::at(dir.path()),
        ..Default::default()
    };

    let data_dir = config.storage.resolve_data_dir().unwrap();
    assert_eq!(
        config.logging.resolve_file(&data_dir),
        dir.path().join("plank.log")
    );
}
