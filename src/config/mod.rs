//
//  yacargo
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module handles loading, saving, and accessing the CLI settings
//! stored as TOML in a platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/yacargo/config.toml`
//! - **macOS**: `~/Library/Application Support/yacargo/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\yacargo\config\config.toml`
//!
//! The `YACARGO_CONFIG` environment variable points the CLI at another
//! file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! test_server = true
//! output = "table"
//! lang = "en"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use yacargo::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("test_server", "true")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The authorization token is never stored here; see [`crate::auth`].

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "YACARGO_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["test_server", "base_url", "output", "lang"];

/// CLI configuration.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `test_server` | `false` |
/// | `base_url` | `None` (derived from `test_server`) |
/// | `output` | `"table"` |
/// | `lang` | `None` (server uses `Accept-Language`) |
///
/// # Notes
///
/// - All fields use `#[serde(default)]` so older files keep loading
/// - The file is created on first save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Use the test host `b2b.taxi.tst.yandex.net`.
    #[serde(default)]
    pub test_server: bool,

    /// Override of the API base URL, e.g. a local mock server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Default output format: `table` or `json`.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default report language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_server: false,
            base_url: None,
            output: default_output(),
            lang: None,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, or returns the
    /// defaults if the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Returns the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns a setting as text, `None` for unset or unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "test_server" => Some(self.test_server.to_string()),
            "base_url" => self.base_url.clone(),
            "output" => Some(self.output.clone()),
            "lang" => self.lang.clone(),
            _ => None,
        }
    }

    /// Updates a setting. An empty value clears optional settings.
    ///
    /// Returns `Ok(false)` for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "test_server" => {
                self.test_server = value
                    .parse()
                    .with_context(|| format!("test_server must be true or false, got '{}'", value))?;
            }
            "base_url" => {
                if let Some(url) = optional(value) {
                    url::Url::parse(&url).with_context(|| format!("Invalid URL '{}'", url))?;
                    self.base_url = Some(url);
                } else {
                    self.base_url = None;
                }
            }
            "output" => {
                if !matches!(value, "table" | "json") {
                    bail!("output must be table or json, got '{}'", value);
                }
                self.output = value.to_string();
            }
            "lang" => self.lang = optional(value),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.test_server);
        assert_eq!(config.output, "table");
        assert_eq!(config.get("base_url"), None);
        assert_eq!(config.get("test_server").as_deref(), Some("false"));
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        assert!(config.set("test_server", "true").unwrap());
        assert!(config.test_server);
        assert!(config.set("lang", "en").unwrap());
        assert_eq!(config.get("lang").as_deref(), Some("en"));
        assert!(config.set("lang", "").unwrap());
        assert_eq!(config.lang, None);
        assert!(!config.set("editor", "vim").unwrap());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("test_server", "yes").is_err());
        assert!(config.set("output", "yaml").is_err());
        assert!(config.set("base_url", "not a url").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing, Config::default());

        let mut config = Config::default();
        config.set("test_server", "true").unwrap();
        config.set("base_url", "http://127.0.0.1:8080").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "lang = \"ru\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.lang.as_deref(), Some("ru"));
        assert_eq!(config.output, "table");
        assert!(!config.test_server);
    }
}
