//! User Model

use serde::{Deserialize, Serialize};

use super::Role;
use crate::resource::Resource;

/// Staff account (password never leaves the server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: Role,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub username: String,
    /// Write-only, only sent at creation
    pub password: String,
    pub role: Role,
}

/// Update user payload
///
/// Partial: absent fields are omitted and keep their server value.
/// Username and password cannot be changed through this payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Resource for User {
    type Id = i64;
    type Create = UserCreate;
    type Update = UserUpdate;

    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.username)
    }
}
