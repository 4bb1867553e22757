//! Bistro Client - role-based restaurant back-office client
//!
//! Session persistence, dashboard gating, typed CRUD over the backend's
//! collections and the list view model behind each management screen.
//!
//! ```no_run
//! # async fn run() -> bistro_client::ClientResult<()> {
//! use std::sync::Arc;
//! use bistro_client::{BistroApi, ClientConfig, ListViewModel, sign_in};
//!
//! let config = ClientConfig::from_env()?;
//! let api = BistroApi::from_config(&config)?;
//! let session = Arc::new(config.open_session_store());
//!
//! let landing = sign_in(&api.auth(), &session, "admin", "secret").await?;
//! println!("landing on {}", landing.path());
//!
//! let mut users = ListViewModel::new(api.users(), session);
//! users.mount().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;
pub mod logging;
pub mod resource;
pub mod session;
pub mod view;

pub use auth::{AuthClient, sign_in, sign_out};
pub use client::BistroApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError, FetchError};
pub use gate::{Access, Route, authorize, navigate};
pub use http::{ApiRequest, HttpTransport, NetworkHttpClient, RawResponse, TransportError};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
pub use logging::init_logger;
pub use resource::ResourceClient;
pub use session::{FileStorage, MemoryStorage, Session, SessionError, SessionStorage, SessionStore};
pub use view::{DeleteConfirmation, Draft, Editor, ListState, ListViewModel, LoadState};

// Re-export shared types for convenience
pub use shared::{
    DiningTable, DiningTablePayload, LoginResponse, MenuCategory, MenuItem, MenuItemPayload,
    Principal, Resource, Role, TableStatus, User, UserCreate, UserUpdate,
};
