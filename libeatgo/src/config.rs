//! Configuration management for EatGo

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const DEFAULT_API_URL: &str = "https://eatgo-customer-api.ahastudio.com";
pub const DEFAULT_LOGIN_URL: &str = "https://eatgo-login-api.ahastudio.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Where the session token is remembered between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single file under the data directory
    #[default]
    File,
    /// OS keyring
    Keyring,
    /// Process memory only (nothing survives a restart)
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_session_path() -> String {
    "~/.local/share/eatgo/access_token".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            login_url: default_login_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            path: default_session_path(),
        }
    }
}

impl SessionConfig {
    /// Expand `~` and environment variables in the token path
    pub fn expand_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing config file is not an error; defaults are used instead.
    /// Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Apply `EATGO_API_URL` and `EATGO_LOGIN_URL` if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("EATGO_API_URL") {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(url) = std::env::var("EATGO_LOGIN_URL") {
            if !url.is_empty() {
                self.api.login_url = url;
            }
        }
        self
    }

    /// Check that URLs look usable and the timeout is positive
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("api.base_url", &self.api.base_url),
            ("api.login_url", &self.api.login_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::MissingField(field.to_string()).into());
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{}' is not an http(s) URL", url),
                }
                .into());
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        if self.session.storage == StorageBackend::File && self.session.path.is_empty() {
            return Err(ConfigError::MissingField("session.path".to_string()).into());
        }

        Ok(())
    }
}

/// Resolve the configuration file path (`EATGO_CONFIG`, else the XDG config dir)
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("EATGO_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("eatgo").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.session.storage, StorageBackend::File);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [session]
            storage = "keyring"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.storage, StorageBackend::Keyring);
        assert_eq!(config.api.login_url, DEFAULT_LOGIN_URL);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [api]
            base_url = "http://localhost:8080"
            timeout_secs = 3

            [session]
            storage = "memory"
            "#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.session.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let result = Config::load_from_path(file.path());
        assert!(matches!(
            result,
            Err(crate::EatgoError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("EATGO_API_URL", "http://127.0.0.1:3000");
        std::env::remove_var("EATGO_LOGIN_URL");
        let config = Config::default().with_env_overrides();
        std::env::remove_var("EATGO_API_URL");

        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.api.login_url, DEFAULT_LOGIN_URL);
    }

    #[test]
    #[serial]
    fn test_load_with_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("EATGO_CONFIG", dir.path().join("absent.toml"));
        std::env::remove_var("EATGO_API_URL");
        std::env::remove_var("EATGO_LOGIN_URL");
        let config = Config::load().unwrap();
        std::env::remove_var("EATGO_CONFIG");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_session_path_expands_tilde() {
        let session = SessionConfig::default();
        let expanded = session.expand_path();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("eatgo/access_token"));
    }
}
