//! Auth DTOs shared between the backend contract and the client
//!
//! Request/response types for `POST /auth/login` and the principal the
//! client keeps in its session.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Principal,
    pub access_token: String,
}

/// Authenticated identity carried by a session
///
/// Issued by the backend at login and replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub name: String,
    /// The login endpoint does not echo the username back
    #[serde(default)]
    pub username: String,
    pub role: Role,
}
