//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.stockbook.io/api/v1";

/// Stockbook client configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the remote API
    pub base_url: Option<String>,

    /// Account login for HTTP basic auth
    pub login: Option<String>,

    /// Account password for HTTP basic auth
    pub password: Option<String>,
}

/// Errors that can occur when resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no credentials configured: set login/password in the config file or STOCKBOOK_LOGIN/STOCKBOOK_PASSWORD")]
    MissingCredentials,

    #[error("failed to read config file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/stockbook/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(global) = Self::from_file(&global_path) {
                    config.merge(global);
                }
            }
        }

        // 3. Environment variables
        if let Ok(base_url) = std::env::var("STOCKBOOK_BASE_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(login) = std::env::var("STOCKBOOK_LOGIN") {
            config.login = Some(login);
        }
        if let Ok(password) = std::env::var("STOCKBOOK_PASSWORD") {
            config.password = Some(password);
        }

        config
    }

    /// Read one config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stockbook")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.login.is_some() {
            self.login = other.login;
        }
        if other.password.is_some() {
            self.password = other.password;
        }
    }

    /// Get the base URL, falling back to the public endpoint
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get the configured credentials, or fail with guidance
    pub fn credentials(&self) -> Result<(String, String), ConfigError> {
        match (&self.login, &self.password) {
            (Some(login), Some(password)) => Ok((login.clone(), password.clone())),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_merge_other_takes_precedence() {
        let mut config = Config {
            base_url: Some("http://old".to_string()),
            login: Some("alice".to_string()),
            password: None,
        };
        config.merge(Config {
            base_url: Some("http://new".to_string()),
            login: None,
            password: Some("secret".to_string()),
        });

        assert_eq!(config.base_url(), "http://new");
        assert_eq!(
            config.credentials().unwrap(),
            ("alice".to_string(), "secret".to_string())
        );
    }

    #[test]
    fn test_base_url_default() {
        assert_eq!(Config::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::default().credentials().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:9999\nlogin: bob").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://localhost:9999");
        assert_eq!(config.login.as_deref(), Some("bob"));
        assert!(config.password.is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }
}
