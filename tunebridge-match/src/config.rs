//! Configuration resolution for tunebridge-match
//!
//! Secrets resolve with ENV → TOML priority. Everything else comes from the
//! bootstrap TOML (or its compiled defaults).

use crate::models::CatalogFormat;
use crate::services::ResolverSettings;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tunebridge_common::config::{TomlConfig, MIN_PACING_MS};

pub const YOUTUBE_KEY_ENV: &str = "TUNEBRIDGE_YOUTUBE_API_KEY";
pub const SPOTIFY_TOKEN_ENV: &str = "TUNEBRIDGE_SPOTIFY_TOKEN";

/// Validate a secret (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve a secret from environment, then TOML
///
/// Warns when both sources hold a valid value.
pub fn resolve_secret(label: &str, env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_value = toml_value.filter(|k| is_valid_key(k));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} found in environment and TOML config. Using environment (highest priority).",
            label
        );
    }

    if let Some(key) = env_value {
        info!("{} loaded from environment variable", label);
        return Some(key.trim().to_string());
    }

    if let Some(key) = toml_value {
        info!("{} loaded from TOML config", label);
        return Some(key.trim().to_string());
    }

    None
}

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub youtube_api_key: Option<String>,
    pub spotify_access_token: Option<String>,
    pub output_dir: PathBuf,
    pub resolver: ResolverSettings,
    pub workers: usize,
}

impl RunSettings {
    pub fn from_config(config: &TomlConfig) -> Self {
        Self {
            youtube_api_key: resolve_secret(
                "Video platform API key",
                YOUTUBE_KEY_ENV,
                config.youtube_api_key.as_deref(),
            ),
            spotify_access_token: resolve_secret(
                "Catalog access token",
                SPOTIFY_TOKEN_ENV,
                config.spotify_access_token.as_deref(),
            ),
            output_dir: config
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            resolver: ResolverSettings {
                pacing: Duration::from_millis(pacing_ms(config)),
                result_limit: config.search.result_limit,
                format: CatalogFormat::from(&config.catalog),
            },
            workers: config.search.workers.max(1),
        }
    }
}

/// Configured pacing, raised to the minimum gap between search calls
fn pacing_ms(config: &TomlConfig) -> u64 {
    if config.search.pacing_ms < MIN_PACING_MS {
        warn!(
            "search.pacing_ms = {} is below the minimum, using {}",
            config.search.pacing_ms, MIN_PACING_MS
        );
        return MIN_PACING_MS;
    }
    config.search.pacing_ms
}
