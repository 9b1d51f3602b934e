//! Configuration file handling.
//!
//! This module provides loading and saving of unityscan configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/unityscan/config.toml`
//! - macOS: `~/Library/Application Support/unityscan/config.toml`
//! - Windows: `%APPDATA%\unityscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! manifest_path = "Packages/manifest.json"
//! report_path = "Security/osv_scan_results.json"
//! timeout_secs = 15
//! parallel = true
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
///
/// All fields have defaults matching the fixed paths and limits the scanner
/// ships with; a config file only needs the fields it wants to change, and
/// command-line flags override the file in turn.
///
/// # Example
///
/// ```no_run
/// use unityscan::Config;
///
/// let config = Config::load().unwrap();
/// println!("Manifest: {}", config.manifest_path.display());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest location, relative to the project directory.
    ///
    /// Default: `Packages/manifest.json`
    pub manifest_path: PathBuf,

    /// Report location, relative to the project directory.
    ///
    /// Default: `Security/osv_scan_results.json`
    pub report_path: PathBuf,

    /// Per-query timeout in seconds.
    ///
    /// Default: 15
    pub timeout_secs: u64,

    /// Whether to run the OSV queries concurrently.
    ///
    /// The report is identical either way; this only changes wall-clock time.
    /// Default: true
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("Packages/manifest.json"),
            report_path: PathBuf::from("Security/osv_scan_results.json"),
            timeout_secs: 15,
            parallel: true,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("unityscan")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    ///
    /// This is useful for showing users what the default config looks like.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
