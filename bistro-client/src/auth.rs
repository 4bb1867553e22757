//! Login flow
//!
//! `POST /auth/login` is the one unauthenticated call. [`sign_in`] wires it
//! to the session store and returns the dashboard to land on.

use std::sync::Arc;
use std::time::Duration;

use shared::{LoginRequest, LoginResponse};

use crate::gate::Route;
use crate::http::{self, ApiRequest, HttpTransport};
use crate::resource::DEFAULT_TIMEOUT;
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

pub const LOGIN_PATH: &str = "/auth/login";

/// Client for the auth endpoints
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exchange credentials for a principal and access token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let request = ApiRequest::post(LOGIN_PATH, body);
        let response =
            http::dispatch(self.transport.as_ref(), self.timeout, request, "Login failed").await?;

        let login: LoginResponse = http::decode(&response.body)?;
        if login.access_token.trim().is_empty() {
            return Err(ClientError::MalformedResponse(
                "Missing access token".to_string(),
            ));
        }
        Ok(login)
    }
}

/// Log in, persist the session and return the role's dashboard
pub async fn sign_in(
    auth: &AuthClient,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> ClientResult<Route> {
    let LoginResponse { user, access_token } = auth.login(username, password).await?;
    let route = Route::landing(user.role);
    store.login(user, access_token)?;
    Ok(route)
}

/// Log out and return the login route
///
/// The session is gone even if clearing durable storage failed; that
/// failure is only logged.
pub fn sign_out(store: &SessionStore) -> Route {
    if let Err(e) = store.logout() {
        tracing::warn!(error = %e, "Failed to clear stored session");
    }
    Route::Login
}
