//! Configuration management for the wwt CLI
//!
//! Stores the server URL and the current session in
//! ~/.config/workwithtokens/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "workwithtokens";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            username: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))
    }

    /// Remember a logged-in session
    pub fn set_session(&mut self, username: String, access_token: String) {
        self.username = Some(username);
        self.access_token = Some(access_token);
    }

    /// Forget the session; returns whether one existed
    pub fn clear_session(&mut self) -> bool {
        self.username = None;
        self.access_token.take().is_some()
    }

    /// Access token, or an error telling the user to log in
    pub fn token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .context("Not logged in. Run 'wwt login' first.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wwt-config-test-{}-{}", std::process::id(), name))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_missing_file_gives_default() {
        let config = Config::load_from(&temp_path("missing")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.token().is_err());
    }

    #[test]
    fn test_session_survives_save_and_load() {
        let path = temp_path("session");
        let mut config = Config::default();
        config.base_url = "https://wwt.example.com".to_string();
        config.set_session("alice".to_string(), "tok".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.token().unwrap(), "tok");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_clear_session() {
        let mut config = Config::default();
        assert!(!config.clear_session());

        config.set_session("alice".to_string(), "tok".to_string());
        assert!(config.clear_session());
        assert!(config.username.is_none());
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_base_url_defaults_when_absent() {
        let config: Config = toml::from_str("username = \"bob\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.username.as_deref(), Some("bob"));
    }
}
