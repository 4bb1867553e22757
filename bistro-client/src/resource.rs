//! Resource client
//!
//! Generic CRUD over one backend collection. Every call:
//!
//! - fails fast with [`ClientError::MissingCredential`] when no token is
//!   given, without touching the network;
//! - sends the token as a bearer credential;
//! - is one shot (no retry) and bounded by the client timeout;
//! - reports failures as [`FetchError`](crate::FetchError) with the server's
//!   message, or a fixed per-operation default.
//!
//! List bodies are normalized here and nowhere else: a 2xx body that is not
//! an array is an empty list, and elements that do not decode are skipped.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use shared::{MenuCategory, MenuItem, Resource, Role, User};

use crate::http::{self, ApiRequest, HttpTransport};
use crate::{ClientError, ClientResult};

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// CRUD client for the collection of `R`
pub struct ResourceClient<R: Resource> {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            timeout: self.timeout,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("collection", &R::COLLECTION)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
            _resource: PhantomData,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /<collection>/`
    pub async fn list(&self, token: Option<&str>) -> ClientResult<Vec<R>> {
        self.list_where(token, &[]).await
    }

    /// `GET /<collection>/?k=v...`
    pub async fn list_where(
        &self,
        token: Option<&str>,
        query: &[(&str, &str)],
    ) -> ClientResult<Vec<R>> {
        let token = require_token(token)?;
        let request = ApiRequest::get(R::collection_path())
            .with_query(query)
            .with_token(token);
        let default_message = format!("Failed to fetch {}", R::PLURAL);
        let response = self.send(request, &default_message).await?;
        Ok(normalize_list(&response.body))
    }

    /// `GET /<collection>/{id}`
    pub async fn get(&self, id: &R::Id, token: Option<&str>) -> ClientResult<R> {
        let token = require_token(token)?;
        let request = ApiRequest::get(R::item_path(id)).with_token(token);
        let default_message = format!("Failed to fetch {}", R::SINGULAR);
        let response = self.send(request, &default_message).await?;
        http::decode(&response.body)
    }

    /// `POST /<collection>/`, returns the entity with its server-assigned id
    pub async fn create(&self, payload: &R::Create, token: Option<&str>) -> ClientResult<R> {
        let token = require_token(token)?;
        let body = serde_json::to_value(payload)?;
        let request = ApiRequest::post(R::collection_path(), body).with_token(token);
        let default_message = format!("Failed to create {}", R::SINGULAR);
        let response = self.send(request, &default_message).await?;
        http::decode(&response.body)
    }

    /// `PUT /<collection>/{id}`
    pub async fn update(
        &self,
        id: &R::Id,
        payload: &R::Update,
        token: Option<&str>,
    ) -> ClientResult<R> {
        let token = require_token(token)?;
        let body = serde_json::to_value(payload)?;
        let request = ApiRequest::put(R::item_path(id), body).with_token(token);
        let default_message = format!("Failed to update {}", R::SINGULAR);
        let response = self.send(request, &default_message).await?;
        http::decode(&response.body)
    }

    /// `DELETE /<collection>/{id}`, the response body is ignored
    pub async fn remove(&self, id: &R::Id, token: Option<&str>) -> ClientResult<()> {
        let token = require_token(token)?;
        let request = ApiRequest::delete(R::item_path(id)).with_token(token);
        let default_message = format!("Failed to delete {}", R::SINGULAR);
        self.send(request, &default_message).await?;
        Ok(())
    }

    async fn send(
        &self,
        request: ApiRequest,
        default_message: &str,
    ) -> ClientResult<http::RawResponse> {
        http::dispatch(self.transport.as_ref(), self.timeout, request, default_message).await
    }
}

impl ResourceClient<User> {
    /// Users holding `role`, e.g. the waiter picker on the table form
    pub async fn list_by_role(&self, token: Option<&str>, role: Role) -> ClientResult<Vec<User>> {
        self.list_where(token, &[("role", role.as_str())]).await
    }
}

impl ResourceClient<MenuItem> {
    pub async fn list_by_category(
        &self,
        token: Option<&str>,
        category: MenuCategory,
    ) -> ClientResult<Vec<MenuItem>> {
        self.list_where(token, &[("category", category.as_str())])
            .await
    }
}

fn require_token(token: Option<&str>) -> ClientResult<&str> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ClientError::MissingCredential),
    }
}

fn normalize_list<R: Resource>(body: &[u8]) -> Vec<R> {
    let items = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(other) => {
            tracing::warn!(
                collection = R::COLLECTION,
                kind = json_kind(&other),
                "List response is not an array, treating as empty"
            );
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(collection = R::COLLECTION, error = %e, "List response is not JSON, treating as empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<R>(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, error = %e, "Skipping malformed list element");
                None
            }
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DiningTable;

    #[test]
    fn test_require_token() {
        assert!(matches!(require_token(None), Err(ClientError::MissingCredential)));
        assert!(matches!(require_token(Some("")), Err(ClientError::MissingCredential)));
        assert!(matches!(require_token(Some("  ")), Err(ClientError::MissingCredential)));
        assert_eq!(require_token(Some("abc")).unwrap(), "abc");
    }

    #[test]
    fn test_normalize_non_array_is_empty() {
        assert!(normalize_list::<DiningTable>(b"{}").is_empty());
        assert!(normalize_list::<DiningTable>(b"null").is_empty());
        assert!(normalize_list::<DiningTable>(b"not json").is_empty());
    }

    #[test]
    fn test_normalize_skips_bad_elements() {
        let body = br#"[
            {"id": 1, "number": "T1", "status": "available"},
            {"id": "oops"},
            {"id": 2, "number": "T2", "status": "occupied", "is_vip": true}
        ]"#;
        let tables = normalize_list::<DiningTable>(body);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].id, 1);
        assert_eq!(tables[1].id, 2);
        assert!(tables[1].is_vip);
    }
}
