//! HTTP transport
//!
//! [`HttpTransport`] moves one JSON request to the backend and hands back the
//! raw status and body. Status checks, message extraction and decoding
//! happen once, in [`dispatch`], so every transport behaves the same.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use thiserror::Error;

use crate::{ClientError, ClientResult, FetchError};

/// One backend call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, e.g. `/users/`
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Bearer token, sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            token: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: &[(&str, &str)]) -> Self {
        self.query
            .extend(query.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// `Authorization` header value, shared by every transport
    pub(crate) fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

/// Status and body of a completed call
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Call did not produce a response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Request(String),
}

/// HTTP transport trait
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for NetworkHttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(auth) = request.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(e.to_string())
    }
}

/// Run one call with a deadline and turn every failure into a [`ClientError`]
///
/// `default_message` is used when the server does not supply one.
pub(crate) async fn dispatch(
    transport: &dyn HttpTransport,
    timeout: Duration,
    request: ApiRequest,
    default_message: &str,
) -> ClientResult<RawResponse> {
    let method = request.method.clone();
    let path = request.path.clone();
    tracing::debug!(%method, %path, "Sending request");

    let response = match tokio::time::timeout(timeout, transport.execute(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(TransportError::Timeout)) | Err(_) => {
            tracing::warn!(%method, %path, ?timeout, "Request timed out");
            return Err(FetchError::timed_out().into());
        }
        Ok(Err(TransportError::Request(reason))) => {
            tracing::warn!(%method, %path, error = %reason, "Request failed");
            return Err(FetchError::new(None, default_message).into());
        }
    };

    let status = response.status;
    if !status.is_success() {
        let message = shared::response::server_message(&response.body)
            .unwrap_or_else(|| default_message.to_string());
        tracing::warn!(%method, %path, status = status.as_u16(), %message, "Request rejected");
        return Err(FetchError::new(Some(status.as_u16()), message).into());
    }

    Ok(response)
}

/// Decode a 2xx body that must be a `T`
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}
