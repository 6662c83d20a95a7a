//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API read access token. `TMDB_API_TOKEN` takes precedence.
    #[serde(default)]
    pub api_token: Option<String>,
    /// API base URL override (e.g. a local mock).
    #[serde(default)]
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

    /// Picks the API token: a non-blank `env_token` wins over the file.
    #[must_use]
    pub fn resolve_api_token(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .into_iter()
            .chain(self.tmdb.api_token.clone())
            .find(|token| !token.trim().is_empty())
    }

    /// Parses the configured base URL, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.tmdb
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid tmdb.base_url: {raw}")))
            .transpose()
    }
}
