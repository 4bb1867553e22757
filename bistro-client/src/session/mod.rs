//! Session store
//!
//! Holds the authenticated principal and its bearer token. One store is
//! created at startup and shared (`Arc<SessionStore>`) with every consumer;
//! nothing reads session state from anywhere else.
//!
//! The in-memory snapshot is rehydrated from durable storage when the store
//! is opened. Anything unusable in storage (missing entry, bad JSON, expired
//! JWT) yields an anonymous session, never an error.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use shared::{Principal, Role};
use thiserror::Error;

/// Storage key of the serialized principal
pub const USER_KEY: &str = "user";
/// Storage key of the raw bearer token
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Refusing to store an empty token")]
    EmptyToken,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Current session
///
/// A token exists exactly when a principal does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { principal: Principal, token: String },
}

impl Session {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated { principal, .. } => Some(principal),
            Self::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Process-wide session store
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    state: RwLock<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.state.read().is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Open a store over `storage`, rehydrating the last session
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let session = rehydrate(&storage);
        Self {
            storage: Box::new(storage),
            state: RwLock::new(session),
        }
    }

    /// Store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Session {
        self.state.read().clone()
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Option<String> {
        self.state.read().token().map(str::to_string)
    }

    /// Current principal, if signed in
    pub fn principal(&self) -> Option<Principal> {
        self.state.read().principal().cloned()
    }

    /// Persist and activate a freshly issued principal/token pair
    ///
    /// Replaces any previous session. On a storage failure nothing is kept:
    /// durable entries are removed and the store falls back to anonymous,
    /// so memory never claims a session that a restart would not restore.
    pub fn login(&self, principal: Principal, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        let user_json = serde_json::to_string(&principal)?;

        let mut state = self.state.write();
        if let Err(e) = self.write_pair(&user_json, &token) {
            let _ = self.storage.remove(USER_KEY);
            let _ = self.storage.remove(TOKEN_KEY);
            tracing::warn!(error = %e, "Failed to persist session, signed out");
            *state = Session::Anonymous;
            return Err(e);
        }

        tracing::info!(user_id = principal.id, role = %principal.role, "Signed in");
        *state = Session::Authenticated { principal, token };
        Ok(())
    }

    /// Clear durable entries and the in-memory session
    ///
    /// The in-memory session is cleared under the same lock as the durable
    /// entries, and even when clearing storage fails.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.state.write();
        let result = self.clear_pair();
        if let Some(principal) = state.principal() {
            tracing::info!(user_id = principal.id, "Signed out");
        }
        *state = Session::Anonymous;
        result
    }

    /// Drop the session after the backend rejected its token
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        if !state.is_authenticated() {
            return;
        }
        if let Err(e) = self.clear_pair() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        tracing::warn!("Session rejected by server, signed out");
        *state = Session::Anonymous;
    }

    fn write_pair(&self, user_json: &str, token: &str) -> Result<(), SessionError> {
        self.storage.set(USER_KEY, user_json)?;
        self.storage.set(TOKEN_KEY, token)
    }

    fn clear_pair(&self) -> Result<(), SessionError> {
        let user = self.storage.remove(USER_KEY);
        let token = self.storage.remove(TOKEN_KEY);
        user.and(token)
    }
}

/// Load the stored pair, degrading every problem to `Anonymous`
fn rehydrate(storage: &dyn SessionStorage) -> Session {
    let user = storage.get(USER_KEY).ok().flatten();
    let token = storage.get(TOKEN_KEY).ok().flatten();

    let (user, token) = match (user, token) {
        (None, None) => return Session::Anonymous,
        (Some(user), Some(token)) if !token.trim().is_empty() => (user, token),
        _ => {
            tracing::warn!("Incomplete stored session, discarding");
            discard(storage);
            return Session::Anonymous;
        }
    };

    let principal = match serde_json::from_str::<Principal>(&user) {
        Ok(principal) => principal,
        Err(e) => {
            tracing::warn!(error = %e, "Corrupt stored principal, discarding session");
            discard(storage);
            return Session::Anonymous;
        }
    };

    if token_expired(&token, now_secs()) {
        tracing::info!(user_id = principal.id, "Stored session expired, discarding");
        discard(storage);
        return Session::Anonymous;
    }

    tracing::info!(user_id = principal.id, role = %principal.role, "Restored session");
    Session::Authenticated { principal, token }
}

fn discard(storage: &dyn SessionStorage) {
    let _ = storage.remove(USER_KEY);
    let _ = storage.remove(TOKEN_KEY);
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Whether `token` is a JWT whose `exp` claim is before `now`
///
/// Tokens that are not JWTs, or carry no `exp`, never expire client side.
fn token_expired(token: &str, now: u64) -> bool {
    jwt_exp(token).is_some_and(|exp| now >= exp)
}

fn jwt_exp(token: &str) -> Option<u64> {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    // header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    claims.get("exp")?.as_u64()
}
