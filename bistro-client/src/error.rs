//! Client error types

use thiserror::Error;

use crate::session::SessionError;

/// HTTP level failure of one backend call
///
/// Covers transport errors, timeouts and non-2xx responses. `message` is
/// what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    /// HTTP status, `None` when no response arrived
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Call did not finish within the configured timeout
    pub fn timed_out() -> Self {
        Self::new(None, "Request timed out")
    }

    /// The backend rejected the bearer token
    pub fn is_auth_rejected(&self) -> bool {
        self.status == Some(401)
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token available, nothing was sent
    #[error("Missing auth token")]
    MissingCredential,

    /// Backend call failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// 2xx response whose body is not the expected shape
    #[error("Invalid response: {0}")]
    MalformedResponse(String),

    /// Request payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Durable session storage failed
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Text for an inline error banner
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => "Missing auth token. Please sign in again.".to_string(),
            Self::Fetch(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    /// The backend answered 401
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_auth_rejected())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status,
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Invalid configuration value
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
