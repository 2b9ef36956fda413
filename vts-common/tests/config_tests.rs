//! Configuration loading and data folder resolution tests
//!
//! Tests that manipulate VTS_DATA_FOLDER are marked with #[serial]
//! so they never run concurrently.

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use vts_common::config::{
    default_data_folder, embeddings_dir, resolve_data_folder, TomlConfig, ENV_DATA_FOLDER,
};
use vts_common::Error;

#[test]
fn test_defaults() {
    let config = TomlConfig::default();
    assert_eq!(config.port, 5000);
    assert_eq!(config.default_dataset, "animals");
    assert_eq!(config.logging.level, "info");
    assert!(config.data_folder.is_none());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = TomlConfig::from_toml_str(
        r#"
        data_folder = "/srv/vtsearch"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.data_folder, Some(PathBuf::from("/srv/vtsearch")));
    assert_eq!(config.port, 5000);
    assert_eq!(config.default_dataset, "animals");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = TomlConfig::from_toml_str("port = \"not a port\"");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TomlConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 5801\ndefault_dataset = \"sounds_s\"\n").unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.port, 5801);
    assert_eq!(config.default_dataset, "sounds_s");
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(ENV_DATA_FOLDER, "/tmp/vts-from-env");
    let toml = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/vts-from-toml")),
        ..TomlConfig::default()
    };

    let folder = resolve_data_folder(Some(Path::new("/tmp/vts-from-cli")), ENV_DATA_FOLDER, &toml);
    assert_eq!(folder, PathBuf::from("/tmp/vts-from-cli"));

    env::remove_var(ENV_DATA_FOLDER);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(ENV_DATA_FOLDER, "/tmp/vts-from-env");
    let toml = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/vts-from-toml")),
        ..TomlConfig::default()
    };

    let folder = resolve_data_folder(None, ENV_DATA_FOLDER, &toml);
    assert_eq!(folder, PathBuf::from("/tmp/vts-from-env"));

    env::remove_var(ENV_DATA_FOLDER);
}

#[test]
#[serial]
fn test_toml_then_default() {
    env::remove_var(ENV_DATA_FOLDER);

    let toml = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/vts-from-toml")),
        ..TomlConfig::default()
    };
    assert_eq!(
        resolve_data_folder(None, ENV_DATA_FOLDER, &toml),
        PathBuf::from("/tmp/vts-from-toml")
    );

    assert_eq!(
        resolve_data_folder(None, ENV_DATA_FOLDER, &TomlConfig::default()),
        default_data_folder()
    );
}

#[test]
fn test_embeddings_dir() {
    assert_eq!(
        embeddings_dir(Path::new("/srv/vts")),
        PathBuf::from("/srv/vts/embeddings")
    );
}
