//! Configuration loading and graceful degradation
//!
//! Tests that manipulate TUNECRAWL_* variables are marked #[serial] so they
//! run sequentially, not in parallel.

use serial_test::serial;
use std::env;
use std::io::Write;
use tunecrawl_common::config::{
    load_config, load_toml_config, resolve_config_path, TomlConfig, API_BASE_ENV,
    CONFIG_PATH_ENV, LOG_LEVEL_ENV,
};
use tunecrawl_common::Error;

fn clear_env() {
    env::remove_var(CONFIG_PATH_ENV);
    env::remove_var(API_BASE_ENV);
    env::remove_var(LOG_LEVEL_ENV);
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_missing_explicit_file_falls_back_to_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let config = load_config(Some(&missing)).unwrap();

    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_explicit_file_is_loaded() {
    clear_env();
    let file = write_config(
        r#"
        [logging]
        level = "tunecrawl_ingest=debug"

        [api]
        base_url = "http://localhost:3000"
        comment_limit = 20
        "#,
    );

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.logging.level, "tunecrawl_ingest=debug");
    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert_eq!(config.api.comment_limit, 20);
    assert_eq!(config.api.comment_concurrency, 1);
}

#[test]
#[serial]
fn test_env_path_used_when_no_explicit_path() {
    clear_env();
    let file = write_config("[api]\ncomment_concurrency = 8\n");
    env::set_var(CONFIG_PATH_ENV, file.path());

    assert_eq!(resolve_config_path(None), Some(file.path().to_path_buf()));
    let config = load_config(None).unwrap();
    assert_eq!(config.api.comment_concurrency, 8);

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_beat_file_values() {
    clear_env();
    let file = write_config("[api]\nbase_url = \"http://from-file\"\n");
    env::set_var(API_BASE_ENV, "http://from-env");
    env::set_var(LOG_LEVEL_ENV, "warn");

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.api.base_url, "http://from-env");
    assert_eq!(config.logging.level, "warn");

    clear_env();
}

#[test]
#[serial]
fn test_blank_env_override_is_ignored() {
    clear_env();
    env::set_var(API_BASE_ENV, "   ");

    let mut config = TomlConfig::default();
    config.apply_env_overrides();

    assert_eq!(config.api.base_url, TomlConfig::default().api.base_url);

    clear_env();
}

#[test]
fn test_unparsable_file_is_config_error() {
    let file = write_config("[api\nbase_url = ");

    let err = load_toml_config(file.path()).unwrap_err();

    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}
