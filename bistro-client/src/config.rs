//! Client configuration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::http::NetworkHttpClient;
use crate::session::{FileStorage, SessionStore};
use crate::{BistroApi, ClientResult};

/// Client configuration for connecting to the backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BISTRO_API_URL | http://localhost:5000 | Backend base URL |
/// | BISTRO_TIMEOUT_SECS | 30 | Per-request timeout |
/// | BISTRO_STORAGE_DIR | (unset) | Session directory, in-memory when unset |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the durable session entries
    pub storage_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT_SECS,
            storage_dir: None,
        }
    }

    /// Load from the environment, defaults for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = var("BISTRO_API_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        let timeout = match var("BISTRO_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "BISTRO_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };
        let storage_dir = var("BISTRO_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            base_url,
            timeout,
            storage_dir,
        })
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist sessions under `dir`
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(&self.base_url, self.timeout_duration())
    }

    /// API facade over the network client
    pub fn build_api(&self) -> ClientResult<BistroApi> {
        let transport = self.build_http_client()?;
        Ok(BistroApi::new(Arc::new(transport)).with_timeout(self.timeout_duration()))
    }

    /// Session store, file backed when a storage directory is set
    pub fn open_session_store(&self) -> SessionStore {
        match &self.storage_dir {
            Some(dir) => SessionStore::open(FileStorage::new(dir)),
            None => SessionStore::in_memory(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}
