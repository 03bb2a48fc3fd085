//! Configuration types for logfold.
//!
//! [`Config::load`] reads `$XDG_CONFIG_HOME/logfold/config.toml` (falling back
//! to `~/.config`), creating it with the built-in defaults if it does not yet
//! exist. [`Config::load_from`] reads an explicit file instead. Both layer
//! `LOGFOLD__SECTION__KEY` environment variables on top. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ingest]
max_file_bytes        = 10485760
max_lines             = 50000
chunk_size            = 500
allowed_content_types = ["text/plain", "application/octet-stream"]
upload_channel        = "file-upload"

[query]
default_limit = 50
max_limit     = 200
"#;

const ENV_PREFIX: &str = "LOGFOLD";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// `[ingest]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Largest upload accepted, in bytes. Enforced at the boundary that
    /// reads the file, before any content reaches the orchestrator.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Ceiling on the approximate line count of one upload.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Records per storage batch when persisting an upload.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,
    /// Ingestion channel recorded for uploads when the caller names none.
    #[serde(default = "default_upload_channel")]
    pub upload_channel: String,
}

fn default_max_file_bytes() -> u64 { 10 * 1024 * 1024 }
fn default_max_lines() -> usize { 50_000 }
fn default_chunk_size() -> usize { 500 }
fn default_allowed_content_types() -> Vec<String> {
    vec!["text/plain".to_string(), "application/octet-stream".to_string()]
}
fn default_upload_channel() -> String { "file-upload".to_string() }

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_lines: default_max_lines(),
            chunk_size: default_chunk_size(),
            allowed_content_types: default_allowed_content_types(),
            upload_channel: default_upload_channel(),
        }
    }
}

/// Returned by [`IngestConfig::check_file_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("file is {actual} bytes, the limit is {limit} bytes")]
pub struct FileTooLarge {
    pub actual: u64,
    pub limit: u64,
}

impl IngestConfig {
    /// Reject a file before reading it if it exceeds `max_file_bytes`.
    pub fn check_file_size(&self, len: u64) -> Result<(), FileTooLarge> {
        if len > self.max_file_bytes {
            return Err(FileTooLarge {
                actual: len,
                limit: self.max_file_bytes,
            });
        }
        Ok(())
    }
}

/// `[query]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize { 50 }
fn default_max_limit() -> usize { 200 }

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the XDG config file, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::build(config::File::from(path.as_path()).required(false))
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.ingest.chunk_size > 0, "ingest.chunk_size must be at least 1");
        anyhow::ensure!(self.ingest.max_lines > 0, "ingest.max_lines must be at least 1");
        anyhow::ensure!(
            !self.ingest.allowed_content_types.is_empty(),
            "ingest.allowed_content_types must not be empty"
        );
        anyhow::ensure!(self.query.max_limit > 0, "query.max_limit must be at least 1");
        anyhow::ensure!(
            (1..=self.query.max_limit).contains(&self.query.default_limit),
            "query.default_limit must be between 1 and query.max_limit ({})",
            self.query.max_limit
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logfold")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
