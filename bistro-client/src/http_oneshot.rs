// bistro-client/src/http_oneshot.rs
// Oneshot HTTP 传输 - 内存调用 (in-process)
//
// 需要启用 "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use reqwest::Url;
use tower::ServiceExt;

use crate::http::{ApiRequest, HttpTransport, RawResponse, TransportError};

/// Oneshot HTTP transport (in-memory)
///
/// Drives an axum [`Router`] through Tower's `oneshot`, so a backend running
/// in the same process (or a test double) is called without a socket.
///
/// # Example
///
/// ```ignore
/// let router: Router = build_backend().with_state(state);
/// let api = BistroApi::new(Arc::new(OneshotHttpClient::new(router)));
/// let tables = api.tables().list(Some(&token)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached (`with_state`)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(request: &ApiRequest) -> Result<Request<Body>, TransportError> {
        let mut builder = Request::builder()
            .method(request.method.clone())
            .uri(Self::uri(request)?);

        if let Some(auth) = request.auth_header() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }

        let body = match &request.body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                let bytes = serde_json::to_vec(json)
                    .map_err(|e| TransportError::Request(e.to_string()))?;
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| TransportError::Request(format!("Failed to build request: {}", e)))
    }

    /// Path plus percent-encoded query
    fn uri(request: &ApiRequest) -> Result<String, TransportError> {
        if request.query.is_empty() {
            return Ok(request.path.clone());
        }
        let mut url = Url::parse("http://in-process")
            .and_then(|base| base.join(&request.path))
            .map_err(|e| TransportError::Request(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(&request.query);
        Ok(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
    }
}

#[async_trait]
impl HttpTransport for OneshotHttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let request = Self::build_request(&request)?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| TransportError::Request(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| TransportError::Request(format!("Failed to read body: {}", e)))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
