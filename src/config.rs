//! Configuration management for tmdbsurfer
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/tmdbsurfer/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "TMDB_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TMDB_API_KEY not found (set the environment variable, the config file, or a .env file)")]
    MissingApiKey,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: Option<String>,
    /// `.env` file holding `TMDB_API_KEY=...` (defaults to ./.env)
    pub env_file: Option<PathBuf>,
    /// Favorites/theme store location
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/tmdbsurfer/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tmdbsurfer").join("config.toml"))
    }

    /// Load config from the default file, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from a specific file, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        let Ok(s) = std::fs::read_to_string(path) else {
            debug!("No config at {}", path.display());
            return Self::default();
        };
        toml::from_str(&s).unwrap_or_else(|e| {
            warn!("Ignoring invalid config {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// `.env` location used for key lookup
    pub fn env_file_path(&self) -> PathBuf {
        self.env_file.clone().unwrap_or_else(|| PathBuf::from(".env"))
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    /// 3. `TMDB_API_KEY=...` line in the `.env` file
    pub fn tmdb_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key(std::env::var(API_KEY_VAR).ok())
    }

    /// Same chain as [`Config::tmdb_api_key`] with the environment value injected
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String, ConfigError> {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }

        if let Some(key) = self.tmdb_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }

        read_env_file(&self.env_file_path()).ok_or(ConfigError::MissingApiKey)
    }
}

/// Find `TMDB_API_KEY` in a `KEY=VALUE` file
pub fn read_env_file(path: &Path) -> Option<String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            debug!("No env file at {}: {}", path.display(), e);
            return None;
        }
    };

    for item in iter {
        match item {
            Ok((key, value)) if key.trim() == API_KEY_VAR => {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping malformed line in {}: {}", path.display(), e),
        }
    }
    None
}
