//! Configuration file support for the log parser CLI.
//!
//! Loads settings from `~/.config/squid-log-parser/config.toml` on Linux
//! (or platform-appropriate location on other OSes).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::record::LogFormat;

/// Application configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log format when none is given on the command line.
    pub format: String,

    /// Print every parsed record as JSON.
    pub show_records: bool,

    /// Print the statistics summary when input is exhausted.
    pub show_stats: bool,

    /// Print a progress line every N parsed lines (0 disables).
    pub progress_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: "squid".to_string(),
            show_records: false,
            show_stats: true,
            progress_interval: 0,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Invalid TOML in config file: {}", path.display()))
            }
            _ => Ok(Config::default()),
        }
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("squid-log-parser/config.toml"))
    }

    /// Validate all configuration settings.
    ///
    /// Rejects format names that no grammar corresponds to.
    pub fn validate(&self) -> Result<()> {
        let format: LogFormat = self.format.parse().unwrap_or(LogFormat::Unknown);
        if format == LogFormat::Unknown {
            anyhow::bail!(
                "unknown log format '{}' (expected squid, common, combined, referrer, or useragent)",
                self.format
            );
        }
        Ok(())
    }
}
