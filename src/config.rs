//! Configuration management for ShowTUI
//!
//! Handles config file loading. The file is hand-edited, never written by
//! the program. Config is stored at ~/.config/showtui/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TVMaze API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL override (for mirrors or proxies)
    pub base_url: Option<String>,
    /// Default result limit for CLI search output
    pub search_limit: Option<usize>,
}

impl Config {
    /// Get config file path (~/.config/showtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("showtui").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Get effective API base URL with fallback chain:
    /// 1. Environment variable TVMAZE_URL
    /// 2. base_url from config file
    /// 3. Built-in default
    pub fn base_url(&self) -> String {
        if let Ok(url) = std::env::var("TVMAZE_URL") {
            return url;
        }
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert!(config.search_limit.is_none());
    }

    #[test]
    fn test_base_url_from_config() {
        let config = Config {
            base_url: Some("http://localhost:9999".to_string()),
            search_limit: None,
        };
        // Env var takes precedence when set, so only assert the config path
        if std::env::var("TVMAZE_URL").is_err() {
            assert_eq!(config.base_url(), "http://localhost:9999");
        }
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let config = Config {
            base_url: Some("http://localhost:9999".to_string()),
            search_limit: Some(5),
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.base_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(parsed.search_limit, Some(5));
    }
}
