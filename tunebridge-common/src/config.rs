//! Bootstrap configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `TUNEBRIDGE_CONFIG`
//! 3. Platform config directory (`<config_dir>/tunebridge/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file never terminates the program: a warning is logged
//! and compiled defaults are used. A config file that exists but cannot be
//! parsed is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TUNEBRIDGE_CONFIG";

/// Smallest accepted gap between search calls of one worker
pub const MIN_PACING_MS: u64 = 500;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// API key for the video platform feed (optional, ENV wins)
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// Ready-to-use bearer token for the catalog API (optional, ENV wins)
    #[serde(default)]
    pub spotify_access_token: Option<String>,

    /// Directory receiving CSV exports (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Search pacing and fan-out
    #[serde(default)]
    pub search: SearchConfig,

    /// Catalog URI namespace and browsable domain
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Minimum delay between consecutive search calls of one worker
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Number of hits requested per search call
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,

    /// Number of logical resolver workers
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            result_limit: default_result_limit(),
            workers: default_workers(),
        }
    }
}

/// Catalog identity settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// URI namespace (`<namespace>:track:<id>`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Browsable domain (`https://<domain>/track/<id>`)
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            domain: default_domain(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_pacing_ms() -> u64 {
    MIN_PACING_MS
}

fn default_result_limit() -> u32 {
    5
}

fn default_workers() -> usize {
    1
}

fn default_namespace() -> String {
    "spotify".to_string()
}

fn default_domain() -> String {
    "open.spotify.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolves which config file (if any) should be read
pub struct ConfigFileResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigFileResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Return the highest-priority config file candidate
    ///
    /// CLI and ENV paths are returned even when the file does not exist so
    /// the loader can warn about them. The platform default is only returned
    /// when it exists.
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        default_config_path().filter(|p| p.exists())
    }
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunebridge").join("config.toml"))
}

/// Load bootstrap configuration with graceful degradation
///
/// - `None` or a non-existent file: warning (for explicit paths) + defaults
/// - Unreadable file: `Error::Io`
/// - Malformed file: `Error::Config`
pub fn load_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    if config.search.workers == 0 {
        return Err(Error::Config("search.workers must be at least 1".to_string()));
    }

    if config.search.pacing_ms < MIN_PACING_MS {
        return Err(Error::Config(format!(
            "search.pacing_ms must be at least {} (got {})",
            MIN_PACING_MS, config.search.pacing_ms
        )));
    }

    info!("Loaded config from {}", path.display());
    Ok(config)
}
