use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://tech-challenge-back-end.vercel.app";

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote posts API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL without trailing slash (e.g., "https://api.example.com").
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Development relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Bind address for the relay (host:port).
    #[serde(default = "default_proxy_bind_addr")]
    pub bind_addr: String,
    /// Path prefix stripped before forwarding (default: "/api").
    #[serde(default = "default_proxy_prefix")]
    pub prefix: String,
    /// Upstream URL; falls back to `api.base_url`.
    #[serde(default)]
    pub target_url: Option<String>,
}

/// Durable session storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session file; defaults to the platform data dir.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_proxy_bind_addr() -> String {
    "127.0.0.1:3003".to_string()
}

fn default_proxy_prefix() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_proxy_bind_addr(),
            prefix: default_proxy_prefix(),
            target_url: None,
        }
    }
}

impl Config {
    /// Upstream the relay forwards to.
    pub fn proxy_target(&self) -> &str {
        self.proxy
            .target_url
            .as_deref()
            .unwrap_or(&self.api.base_url)
    }
}
