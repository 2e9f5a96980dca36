use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Env var overriding `api.base_url`.
pub const API_URL_ENV: &str = "POSTBOARD_API_URL";
/// Env var overriding the relay port.
pub const PORT_ENV: &str = "PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/postboard/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("postboard").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML, normalizes and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply `POSTBOARD_API_URL` and `PORT` using `lookup` to read the
    /// environment, then re-validate.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }

        if let Some(port) = lookup(PORT_ENV).filter(|v| !v.is_empty()) {
            let port: u16 = port.parse().map_err(|_| ConfigError::ValidationError {
                message: format!("{} must be a port number, got '{}'", PORT_ENV, port),
            })?;
            let host = self
                .proxy
                .bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("127.0.0.1");
            self.proxy.bind_addr = format!("{}:{}", host, port);
        }

        self.normalize();
        self.validate()
    }

    fn normalize(&mut self) {
        trim_trailing_slash(&mut self.api.base_url);
        if let Some(target) = self.proxy.target_url.as_mut() {
            trim_trailing_slash(target);
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - API and relay target URLs are http(s)
    /// - Timeouts are non-zero
    /// - The relay prefix is an absolute, non-root path
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("api.base_url", &self.api.base_url)?;
        if let Some(target) = &self.proxy.target_url {
            check_url("proxy.target_url", target)?;
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "API timeouts must be greater than zero".to_string(),
            });
        }

        let prefix = &self.proxy.prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "proxy.prefix must look like '/api', got '{}'",
                    prefix
                ),
            });
        }

        Ok(())
    }
}

fn trim_trailing_slash(url: &mut String) {
    while url.ends_with('/') {
        url.pop();
    }
}

fn check_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        message: format!("{} must be an http(s) URL, got '{}'", field, url),
    })
}
