//! Configuration for the enrichment client.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (ENRICH_API_URL, ENRICH_TIMEOUT_SECONDS)
//! 2. Config file (.enrich/config.yaml)
//! 3. Defaults (http://localhost:8000, 30s lookup timeout)
//!
//! Config file discovery:
//! - Searches the current directory and parents for .enrich/config.yaml
//! - Falls back to ~/.enrich/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default API base URL when nothing else is configured
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default duplicate-lookup timeout in seconds
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    /// Base URL of the enrichment API
    pub url: Option<String>,
    /// Timeout for the duplicate lookup (the stream itself has none)
    pub timeout_seconds: Option<u64>,
}

/// Resolved configuration after merging all sources
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base URL of the enrichment API
    pub api_url: String,
    /// Duplicate-lookup timeout in seconds
    pub timeout_seconds: u64,
    /// Path to the config file that was used (if found)
    pub config_file: Option<PathBuf>,
}

/// Get the resolved configuration, loading it on first access
pub fn get() -> Result<&'static ResolvedConfig> {
    let cached = CONFIG.get_or_init(|| load().map_err(|e| format!("{:#}", e)));
    match cached {
        Ok(config) => Ok(config),
        Err(msg) => anyhow::bail!("Configuration error: {}", msg),
    }
}

/// Load configuration from all sources (uncached)
pub fn load() -> Result<ResolvedConfig> {
    let file_path = discover_config_file();
    let file = match &file_path {
        Some(path) => Some(read_config_file(path)?),
        None => None,
    };

    Ok(resolve(
        file,
        file_path,
        std::env::var("ENRICH_API_URL").ok(),
        std::env::var("ENRICH_TIMEOUT_SECONDS").ok(),
    ))
}

/// Merge env overrides, file values and defaults into a resolved config
fn resolve(
    file: Option<ConfigFile>,
    file_path: Option<PathBuf>,
    env_url: Option<String>,
    env_timeout: Option<String>,
) -> ResolvedConfig {
    let file = file.unwrap_or_default();

    let api_url = env_url
        .filter(|s| !s.is_empty())
        .or(file.api.url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let timeout_seconds = env_timeout
        .and_then(|s| s.parse().ok())
        .or(file.api.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    ResolvedConfig {
        api_url,
        timeout_seconds,
        config_file: file_path,
    }
}

/// Parse a config file
fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Walk from the current directory up to the root looking for
/// .enrich/config.yaml, then fall back to the home directory.
fn discover_config_file() -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir: Option<&Path> = Some(cwd.as_path());
        while let Some(d) = dir {
            let candidate = d.join(".enrich").join("config.yaml");
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = d.parent();
        }
    }

    let home_candidate = dirs::home_dir()?.join(".enrich").join("config.yaml");
    home_candidate.is_file().then_some(home_candidate)
}
