use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Default gateway domain the fixture feed is served from
pub const DEFAULT_API_DOMAIN: &str = "https://gateway.score-buster.dev.royal-gambit.io";

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// API domain for fetching fixture data. Should include https:// prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing config file is not an error; defaults are used instead.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `TYPER_API_DOMAIN` - Override API domain
    /// - `TYPER_LOG_FILE` - Override log file path
    /// - `TYPER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(&Self::get_config_path()).await
    }

    /// Loads configuration from an explicit path; used directly by tests.
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            config.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_domain.trim().is_empty() {
            return Err(AppError::config_error("API domain must not be empty"));
        }
        if !self.api_domain.starts_with("http://") && !self.api_domain.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "API domain must start with http:// or https://, got: {}",
                self.api_domain
            )));
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error(
                "HTTP timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Saves the configuration to the default config file location.
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&Self::get_config_path()).await
    }

    /// Saves the configuration to an explicit path; used directly by tests.
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        let path = PathBuf::from(config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(&path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Displays the current configuration to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config = Self::load().await?;
        println!("Config file location: {}", Self::get_config_path());
        println!("API domain: {}", config.api_domain);
        println!("HTTP timeout: {}s", config.http_timeout_seconds);
        match &config.log_file_path {
            Some(path) => println!("Log file: {path}"),
            None => println!("Log file: {} (default)", Self::get_log_dir_path()),
        }
        Ok(())
    }

    /// Returns the platform-specific path of the config file.
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typer_funnel")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific directory for log files.
    pub fn get_log_dir_path() -> String {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typer_funnel")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        // Safety: tests are serialized with #[serial]
        unsafe {
            std::env::remove_var(env_vars::API_DOMAIN);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_config_file_uses_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.api_domain, DEFAULT_API_DOMAIN);
        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
        assert_eq!(config.log_file_path, None);
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_load_round_trip() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config {
            api_domain: "https://example.test".to_string(),
            log_file_path: Some("/tmp/typer.log".to_string()),
            http_timeout_seconds: 10,
        };
        config.save_to_path(path_str).await.unwrap();

        let loaded = Config::load_from_path(path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://example.test");
        assert_eq!(loaded.log_file_path, Some("/tmp/typer.log".to_string()));
        assert_eq!(loaded.http_timeout_seconds, 10);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_take_precedence() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config {
            api_domain: "https://file-domain.test".to_string(),
            log_file_path: None,
            http_timeout_seconds: 30,
        };
        config.save_to_path(path_str).await.unwrap();

        unsafe {
            std::env::set_var(env_vars::API_DOMAIN, "https://env-domain.test");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "7");
        }

        let loaded = Config::load_from_path(path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://env-domain.test");
        assert_eq!(loaded.http_timeout_seconds, 7);

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_api_domain_is_rejected() {
        clear_env();
        let config = Config {
            api_domain: "gateway.example.test".to_string(),
            log_file_path: None,
            http_timeout_seconds: 30,
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let empty = Config {
            api_domain: "  ".to_string(),
            log_file_path: None,
            http_timeout_seconds: 30,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = Config {
            api_domain: DEFAULT_API_DOMAIN.to_string(),
            log_file_path: None,
            http_timeout_seconds: 0,
        };
        assert!(config.validate().is_err());
    }
}
