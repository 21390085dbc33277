//! Application configuration module.
//!
//! Manages the TOML config file holding OMDB connection settings.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, resolve_config_path};
