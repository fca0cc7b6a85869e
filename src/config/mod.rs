//! Configuration for the marketplace console
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/testmarket/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod listing;
mod logging;
mod serialization;
mod source;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use listing::{FilePageSizes, ListingConfig, PageSizes};
pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use source::{FileSourceConfig, SourceConfig, SourceKind};

use crate::listing::TabPolicy;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "TESTMARKET_";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Whether to run the TUI (disabled for headless mode)
    pub enable_tui: bool,

    /// Tab policy and page sizes
    pub listing: ListingConfig,

    /// Where records come from and how often they are refetched
    pub source: SourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            enable_tui: true,
            listing: ListingConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub tab_policy: Option<String>,

    /// Optional [source] section
    pub source: Option<FileSourceConfig>,

    /// Optional [page_sizes] section
    pub page_sizes: Option<FilePageSizes>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/testmarket/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("testmarket").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A file that exists but does not parse is an error: a broken config
    /// should fail fast instead of silently falling back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (check quoting, true/false values and section names, \
                     or run `testmarket config --reset`)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        let mut config =
            Self::from_layers(file, |key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())?;

        // Bearer token: read from the variable named by token_env, never
        // from the file itself
        config.source.token = std::env::var(&config.source.token_env)
            .ok()
            .filter(|t| !t.is_empty());

        Ok(config)
    }

    /// Merge a parsed config file with environment overrides.
    ///
    /// `env` looks up a variable by its name without the `TESTMARKET_`
    /// prefix.
    pub(crate) fn from_layers<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Theme: env > file > default
        let theme = env("THEME").or(file.theme).unwrap_or(defaults.theme);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Tab policy: env > file > default
        let tab_policy = env("TAB_POLICY")
            .or(file.tab_policy)
            .map(|s| TabPolicy::from_str(&s))
            .unwrap_or_default();

        let listing = ListingConfig {
            tab_policy,
            page_sizes: PageSizes::from_file(file.page_sizes),
        };

        let mut source = SourceConfig::from_file(file.source)?;
        if let Some(kind) = env("SOURCE") {
            source.kind = match SourceKind::parse(&kind) {
                Some(kind) => kind,
                None => bail!(
                    "Invalid {}SOURCE {:?} (expected one of: file, http, demo)",
                    ENV_PREFIX,
                    kind
                ),
            };
        }
        if let Some(path) = env("FILE") {
            source.file = Some(PathBuf::from(path));
        }
        if let Some(url) = env("URL") {
            source.url = Some(url);
        }
        if let Some(secs) = env("POLL_SECS").and_then(|v| v.parse().ok()) {
            source.poll_interval_secs = secs;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            theme,
            enable_tui,
            listing,
            source,
            logging,
        })
    }
}
