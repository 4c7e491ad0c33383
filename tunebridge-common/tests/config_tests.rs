//! Unit tests for configuration and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate TUNEBRIDGE_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tunebridge_common::config::{
    load_config, ConfigFileResolver, SearchConfig, TomlConfig, CONFIG_ENV_VAR, MIN_PACING_MS,
};
use tunebridge_common::Error;

#[test]
fn test_defaults_when_no_file() {
    let config = load_config(None).unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.search.pacing_ms, 500);
    assert_eq!(config.search.result_limit, 5);
    assert_eq!(config.search.workers, 1);
    assert_eq!(config.catalog.namespace, "spotify");
    assert_eq!(config.catalog.domain, "open.spotify.com");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_degrades_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let config = load_config(Some(&missing)).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_partial_file_keeps_section_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
youtube_api_key = "yt-key"
output_dir = "/tmp/exports"

[search]
pacing_ms = 750
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.youtube_api_key.as_deref(), Some("yt-key"));
    assert_eq!(config.spotify_access_token, None);
    assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/exports")));
    assert_eq!(
        config.search,
        SearchConfig {
            pacing_ms: 750,
            result_limit: 5,
            workers: 1,
        }
    );
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "search = [unclosed").unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_zero_workers_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[search]\nworkers = 0\n").unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("workers"));
}

#[test]
fn test_pacing_below_floor_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    for pacing_ms in [0, MIN_PACING_MS - 1] {
        fs::write(&path, format!("[search]\npacing_ms = {}\n", pacing_ms)).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("pacing_ms"));
    }

    fs::write(&path, format!("[search]\npacing_ms = {}\n", MIN_PACING_MS)).unwrap();
    assert_eq!(load_config(Some(&path)).unwrap().search.pacing_ms, MIN_PACING_MS);
}

#[test]
#[serial]
fn test_cli_path_beats_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolver = ConfigFileResolver::new(Some(PathBuf::from("/tmp/from-cli.toml")));
    assert_eq!(resolver.resolve(), Some(PathBuf::from("/tmp/from-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_path_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");

    let resolver = ConfigFileResolver::new(None);
    assert_eq!(resolver.resolve(), Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_env_path_ignored() {
    env::set_var(CONFIG_ENV_VAR, "   ");

    let resolver = ConfigFileResolver::new(None);
    let resolved = resolver.resolve();
    // Falls through to the platform default, which only counts if it exists
    if let Some(path) = resolved {
        assert!(path.exists());
    }

    env::remove_var(CONFIG_ENV_VAR);
}
