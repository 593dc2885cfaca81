//! Application configuration module.
//!
//! Manages the TOML config file holding catalog, search and trending
//! settings. The API token is read from the environment, never from here.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
