//! Server configuration.
//!
//! Loaded from a TOML file whose location comes from the `CONFIG_PATH`
//! environment variable or, failing that, a command-line flag.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Which student store backend to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database at `storage_path`
    #[default]
    Sqlite,
    /// Process-local store, `storage_path` is ignored
    Memory,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Bind address, e.g. `127.0.0.1:8082`
    pub address: String,
    /// Request body read timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Store read timeout in milliseconds; writes always run to completion
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_response_timeout_ms() -> u64 {
    10000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8082".to_string(),
            request_timeout_ms: default_request_timeout_ms(),
            response_timeout_ms: default_response_timeout_ms(),
        }
    }
}

impl HttpServerConfig {
    /// Parses `address` as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidField {
                field: "http_server.address",
                reason: format!("'{}': {}", self.address, e),
            })
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Environment label (e.g. "local", "production")
    pub env: String,
    /// Database location for the SQLite backend
    pub storage_path: String,
    #[serde(default)]
    pub storage_backend: StorageBackend,
    #[serde(default)]
    pub version: Option<String>,
    pub http_server: HttpServerConfig,
}

impl ServerConfig {
    /// Reads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded config from {} (env={})", path.display(), config.env);
        Ok(config)
    }

    /// Parses and validates config text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("env", &self.env)?;
        require_non_empty("http_server.address", &self.http_server.address)?;
        if self.storage_backend == StorageBackend::Sqlite {
            require_non_empty("storage_path", &self.storage_path)?;
        }
        self.http_server.bind_addr()?;
        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Picks the config file location.
///
/// The environment value wins over the flag; empty values count as unset.
pub fn resolve_config_path(
    env_value: Option<String>,
    flag: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| flag.filter(|p| !p.as_os_str().is_empty()))
        .ok_or(ConfigError::MissingPath)
}
