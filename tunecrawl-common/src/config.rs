//! Configuration loading and resolution
//!
//! Resolution priority for the config file:
//! 1. Explicit path argument (highest priority)
//! 2. `TUNECRAWL_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/tunecrawl/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing file is never fatal: a warning is logged and defaults are used.
//! A file that exists but does not parse is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TUNECRAWL_CONFIG";
/// Environment variable overriding `api.base_url`
pub const API_BASE_ENV: &str = "TUNECRAWL_API_BASE";
/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV: &str = "TUNECRAWL_LOG_LEVEL";

const DEFAULT_BASE_URL: &str = "http://neteaseapi.youkeda.com:3000";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Remote API configuration
    pub api: ApiConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (e.g. "info", "tunecrawl_ingest=debug")
    pub level: String,
    /// Include the event target in formatted output
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

/// Remote API configuration
///
/// Endpoint templates are relative to `base_url` and use `{ids}` for the
/// identifier (or comma-joined identifier batch) and `{limit}` for the
/// comment page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub collection_endpoint: String,
    pub detail_endpoint: String,
    pub comment_endpoint: String,
    pub url_endpoint: String,
    /// Comments requested per track
    pub comment_limit: u32,
    /// Comment requests allowed in flight at once
    pub comment_concurrency: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection_endpoint: "artists?id={ids}".to_string(),
            detail_endpoint: "song/detail?ids={ids}".to_string(),
            comment_endpoint: "comment/music?id={ids}&limit={limit}".to_string(),
            url_endpoint: "song/url?id={ids}".to_string(),
            comment_limit: 5,
            comment_concurrency: 1,
        }
    }
}

impl TomlConfig {
    /// Apply `TUNECRAWL_API_BASE` and `TUNECRAWL_LOG_LEVEL` overrides
    pub fn apply_env_overrides(&mut self) {
        if let Some(base) = non_empty_env(API_BASE_ENV) {
            debug!(base_url = %base, "API base URL overridden from environment");
            self.api.base_url = base;
        }
        if let Some(level) = non_empty_env(LOG_LEVEL_ENV) {
            debug!(level = %level, "Log level overridden from environment");
            self.logging.level = level;
        }
    }
}

/// Resolve the config file path following the documented priority order
///
/// Returns `None` when no candidate exists on disk.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: explicit argument, returned even if missing so the caller can warn
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    // Priority 2: environment variable
    if let Some(path) = non_empty_env(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: platform config directory
    dirs::config_dir()
        .map(|d| d.join("tunecrawl").join("config.toml"))
        .filter(|p| p.exists())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load configuration with graceful degradation and environment overrides
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) if path.exists() => {
            let config = load_toml_config(&path)?;
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        Some(path) => {
            warn!(
                path = %path.display(),
                "Config file not found, using compiled defaults"
            );
            TomlConfig::default()
        }
        None => {
            debug!("No config file found, using compiled defaults");
            TomlConfig::default()
        }
    };

    config.apply_env_overrides();
    Ok(config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
