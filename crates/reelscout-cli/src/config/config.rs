//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reelscout_tui::Settings;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default minimum interval between catalog requests, in milliseconds.
const DEFAULT_MIN_INTERVAL_MS: u64 = 25;
/// Default search debounce, in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 1000;
/// Default number of trending records.
const DEFAULT_TRENDING_LIMIT: u32 = 5;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search box settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Trending rail settings.
    #[serde(default)]
    pub trending: TrendingConfig,
}

/// Catalog client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Base URL override (defaults to the public TMDB v3 endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Minimum interval between requests.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

/// Search box configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period before typed text is committed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Trending rail configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendingConfig {
    /// Number of records shown.
    #[serde(default = "default_trending_limit")]
    pub limit: u32,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

const fn default_min_interval_ms() -> u64 {
    DEFAULT_MIN_INTERVAL_MS
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_trending_limit() -> u32 {
    DEFAULT_TRENDING_LIMIT
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
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }

    /// Parsed base URL override. A missing trailing slash is added so
    /// endpoint paths join below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the override is not a valid absolute URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        let Some(raw) = self.tmdb.base_url.as_deref() else {
            return Ok(None);
        };
        let normalized = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{raw}/")
        };
        let url = Url::parse(&normalized)
            .with_context(|| format!("invalid tmdb.base_url: {raw}"))?;
        Ok(Some(url))
    }

    /// Minimum interval between catalog requests.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.tmdb.min_interval_ms)
    }

    /// Controller settings derived from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if `trending.limit` is zero.
    pub fn settings(&self) -> Result<Settings> {
        if self.trending.limit == 0 {
            bail!("trending.limit must be at least 1");
        }
        Ok(Settings {
            debounce: Duration::from_millis(self.search.debounce_ms),
            trending_limit: self.trending.limit,
        })
    }
}
