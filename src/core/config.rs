//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lcadash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::nav::NavSection;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub initial_route: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub static_mode: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

/// An extra markdown page served at `route`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageEntry {
    pub route: String,
    pub title: String,
    /// Markdown file, relative to `~/.lcadash/` unless absolute.
    pub file: PathBuf,
    pub nav: Option<NavSection>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;
pub const MIN_POLL_INTERVAL_MS: u64 = 50;
pub const DEFAULT_LOG_FILE: &str = "lcadash.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Raw location token the dashboard opens at.
    pub initial_token: String,
    pub poll_interval: Duration,
    pub static_mode: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub pages: Vec<PageEntry>,
    /// Problems found while resolving. Resolution runs before the logger
    /// exists, so the caller logs these once it does.
    pub warnings: Vec<String>,
}

/// Values given on the command line (None/false = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub route: Option<String>,
    pub poll_ms: Option<u64>,
    pub static_mode: bool,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.lcadash`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lcadash"))
}

/// Returns the path to `~/.lcadash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.lcadash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DashConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DashConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<DashConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r##"# lcadash Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_route = "#results/impact-overview"   # Or LCADASH_ROUTE / --route
# poll_interval_ms = 300                       # Or LCADASH_POLL_MS / --poll-ms
# static_mode = false                          # Render home once, ignore navigation
# log_level = "debug"                          # Or LCADASH_LOG_LEVEL / --log-level
# log_file = "lcadash.log"

# [[pages]]
# route = "results/uncertainty"
# title = "Uncertainty"
# file = "pages/uncertainty.md"                # Relative to ~/.lcadash/
# nav = "results"                              # "home", "modeling" or "results"
"##;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DashConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &DashConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    // Initial route: CLI → env → config → empty (home)
    let initial_token = cli
        .route
        .clone()
        .or_else(|| env("LCADASH_ROUTE"))
        .or_else(|| config.general.initial_route.clone())
        .unwrap_or_default();

    // Poll interval: CLI → env → config → default, clamped to a floor
    let poll_ms = cli
        .poll_ms
        .or_else(|| {
            env("LCADASH_POLL_MS").and_then(|v| parse_or_note(&v, "LCADASH_POLL_MS", &mut warnings))
        })
        .or(config.general.poll_interval_ms)
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
    let poll_ms = if poll_ms < MIN_POLL_INTERVAL_MS {
        warnings.push(format!(
            "Poll interval {poll_ms}ms is too short, using {MIN_POLL_INTERVAL_MS}ms"
        ));
        MIN_POLL_INTERVAL_MS
    } else {
        poll_ms
    };

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("LCADASH_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| parse_or_note(&level, "log level", &mut warnings))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let base = config_dir();
    let pages = config
        .pages
        .iter()
        .map(|page| PageEntry {
            file: resolve_page_file(base.as_deref(), &page.file),
            ..page.clone()
        })
        .collect();

    ResolvedConfig {
        initial_token,
        poll_interval: Duration::from_millis(poll_ms),
        static_mode: cli.static_mode || config.general.static_mode.unwrap_or(false),
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
        pages,
        warnings,
    }
}

fn parse_or_note<T: std::str::FromStr>(raw: &str, what: &str, notes: &mut Vec<String>) -> Option<T> {
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            notes.push(format!("Ignoring invalid {what}: {raw:?}"));
            None
        }
    }
}

/// Page files are relative to the config directory unless absolute.
fn resolve_page_file(base: Option<&Path>, file: &Path) -> PathBuf {
    match base {
        Some(base) if file.is_relative() => base.join(file),
        _ => file.to_path_buf(),
    }
}
