use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::client::DEFAULT_ENDPOINT;
use crate::error::{GhError, Result};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

pub const DEFAULT_PATH: &str = "the-road-to-learn-react/the-road-to-learn-react";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub default_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| GhError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| GhError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "gh-issues")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(GhError::NoConfigDir)
    }

    /// Get token with env var taking precedence over config file
    pub fn token(&self) -> Result<String> {
        self.resolve_token(std::env::var(TOKEN_ENV).ok())
    }

    fn resolve_token(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.token.clone())
            .ok_or(GhError::MissingToken)
    }

    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        Url::parse(raw).map_err(|e| GhError::InvalidEndpoint {
            endpoint: raw.to_string(),
            source: e,
        })
    }

    /// Get repository path, preferring explicit argument over default
    pub fn resolve_path(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.default_path.clone())
            .unwrap_or_else(|| DEFAULT_PATH.to_string())
    }
}
