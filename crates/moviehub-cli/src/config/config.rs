//! `AppConfig` struct and TOML read/write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use moviehub_api::omdb::DEFAULT_BASE_URL;
use moviehub_store::{BaseDir, resolve_app_file};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `[omdb] api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Characters of the API key left visible by [`AppConfig::masked_api_key`].
const VISIBLE_KEY_CHARS: usize = 4;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDB connection settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDB connection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (default: `https://www.omdbapi.com/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Returns the effective API key: `env_override` if non-blank, else the
    /// configured key if non-blank.
    #[must_use]
    pub fn api_key(&self, env_override: Option<String>) -> Option<String> {
        env_override
            .into_iter()
            .chain(self.omdb.api_key.clone())
            .map(|k| String::from(k.trim()))
            .find(|k| !k.is_empty())
    }

    /// Returns the effective base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL does not parse.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.omdb.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).with_context(|| format!("invalid [omdb] base_url: {raw}"))
    }

    /// Returns the configured key with all but the first few characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.omdb.api_key.as_deref().map(|key| {
            let visible: String = key.chars().take(VISIBLE_KEY_CHARS).collect();
            if key.chars().count() > VISIBLE_KEY_CHARS {
                format!("{visible}****")
            } else {
                String::from("****")
            }
        })
    }
}

/// Resolves `{dir}/config.toml`, or `~/.config/moviehub/config.toml` without `dir`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    resolve_app_file(dir, BaseDir::Config, CONFIG_FILE)
}
