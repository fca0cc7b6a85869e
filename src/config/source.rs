//! Record source configuration

use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP request timeout when none (or zero) is configured
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Source Kind
// ─────────────────────────────────────────────────────────────────────────────

/// Where snapshots are fetched from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// JSON snapshot document on disk
    File,
    /// JSON snapshot document served over HTTP
    Http,
    /// Generated marketplace data (default)
    #[default]
    Demo,
}

impl SourceKind {
    /// Parse kind string from config or env
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Some(Self::File),
            "http" | "https" => Some(Self::Http),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::Demo => "demo",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Snapshot path for the file source
    pub file: Option<PathBuf>,
    /// Snapshot URL for the http source
    pub url: Option<String>,
    /// Name of the environment variable holding the bearer token
    pub token_env: String,
    /// Resolved bearer token (never written to the config file)
    pub token: Option<String>,
    /// Seconds between refetches; 0 only refetches on demand
    pub poll_interval_secs: u64,
    /// HTTP request timeout
    pub timeout_secs: u64,
    /// Seed for the demo generator
    pub demo_seed: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Demo,
            file: None,
            url: None,
            token_env: "TESTMARKET_TOKEN".to_string(),
            token: None,
            poll_interval_secs: 30,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            demo_seed: 42,
        }
    }
}

/// Source settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileSourceConfig {
    pub kind: Option<String>,
    pub file: Option<String>,
    pub url: Option<String>,
    pub token_env: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub demo_seed: Option<u64>,
}

impl SourceConfig {
    /// HTTP request timeout. Zero in the config falls back to the default
    /// instead of failing every request immediately.
    pub fn request_timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Create from file config with defaults. An unknown kind is an error.
    pub fn from_file(file: Option<FileSourceConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let kind = match file.kind {
            Some(s) => match SourceKind::parse(&s) {
                Some(kind) => kind,
                None => bail!(
                    "Invalid [source].kind {:?} (expected one of: file, http, demo)",
                    s
                ),
            },
            None => defaults.kind,
        };

        Ok(Self {
            kind,
            file: file.file.map(PathBuf::from).or(defaults.file),
            url: file.url.or(defaults.url),
            token_env: file.token_env.unwrap_or(defaults.token_env),
            token: None,
            poll_interval_secs: file
                .poll_interval_secs
                .unwrap_or(defaults.poll_interval_secs),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
            demo_seed: file.demo_seed.unwrap_or(defaults.demo_seed),
        })
    }
}
