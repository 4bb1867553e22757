//! API facade
//!
//! One transport, shared by every resource and auth client built from it.

use std::sync::Arc;
use std::time::Duration;

use shared::{DiningTable, MenuItem, Resource, User};

use crate::ClientResult;
use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::http::HttpTransport;
use crate::resource::{DEFAULT_TIMEOUT, ResourceClient};

/// Client factory
///
/// - [`BistroApi::from_config`] talks to the backend over HTTP
/// - [`BistroApi::in_process`] calls an axum Router in memory
#[derive(Clone)]
pub struct BistroApi {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl std::fmt::Debug for BistroApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BistroApi")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl BistroApi {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Network client for `config.base_url`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        config.build_api()
    }

    /// In-process client (needs the Router)
    #[cfg(feature = "in-process")]
    pub fn in_process(router: axum::Router) -> Self {
        Self::new(Arc::new(crate::http_oneshot::OneshotHttpClient::new(router)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(Arc::clone(&self.transport)).with_timeout(self.timeout)
    }

    pub fn users(&self) -> ResourceClient<User> {
        self.resource()
    }

    pub fn tables(&self) -> ResourceClient<DiningTable> {
        self.resource()
    }

    pub fn menu_items(&self) -> ResourceClient<MenuItem> {
        self.resource()
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(Arc::clone(&self.transport)).with_timeout(self.timeout)
    }
}
