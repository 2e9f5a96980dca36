//! Configuration: TOML file and environment overrides.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ProxyConfig, StorageConfig, DEFAULT_API_URL};
