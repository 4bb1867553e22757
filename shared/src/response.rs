//! Error response bodies
//!
//! The backend reports failures as JSON with a `message` field. Its JWT
//! layer and login endpoint use `msg` instead. Both are optional.

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, `None` when it is not a JSON object
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// Server supplied message, `message` first, then `msg`
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.msg.filter(|m| !m.trim().is_empty()))
    }
}

/// Extract the server supplied message from a raw error body
pub fn server_message(bytes: &[u8]) -> Option<String> {
    ErrorBody::parse(bytes).and_then(ErrorBody::into_message)
}
