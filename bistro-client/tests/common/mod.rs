//! In-memory backend for integration tests
//!
//! Speaks the same JSON as the real backend for `/auth/login` and every
//! `/<collection>/` resource. Only `Bearer good-token` is accepted.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bistro_client::{
    ApiRequest, BistroApi, HttpTransport, OneshotHttpClient, RawResponse, TransportError,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
pub struct Backend {
    records: Mutex<HashMap<String, Vec<Value>>>,
    list_body: Mutex<Option<Value>>,
    delay: Mutex<Option<Duration>>,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backend holding `A(1)` and `B(2)` in `/users/`
    pub fn with_users() -> Arc<Self> {
        let backend = Self::new();
        backend.seed(
            "users",
            vec![
                json!({"id": 1, "name": "A", "username": "a", "role": "waiter"}),
                json!({"id": 2, "name": "B", "username": "b", "role": "kitchen"}),
            ],
        );
        backend
    }

    pub fn seed(&self, collection: &str, items: Vec<Value>) {
        self.records.lock().insert(collection.to_string(), items);
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.records
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Answer every list call with `body` instead of the stored records
    pub fn set_list_body(&self, body: Value) {
        *self.list_body.lock() = Some(body);
    }

    /// Sleep before answering any call
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/{collection}/", get(list).post(create))
            .route(
                "/{collection}/{id}",
                get(get_one).put(update).delete(remove),
            )
            .with_state(Arc::clone(self))
    }

    async fn pause(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Counts every call that reaches the transport
pub struct CountingTransport {
    inner: OneshotHttpClient,
    calls: AtomicUsize,
}

impl CountingTransport {
    pub fn new(router: Router) -> Arc<Self> {
        Arc::new(Self {
            inner: OneshotHttpClient::new(router),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(request).await
    }
}

pub struct Harness {
    pub backend: Arc<Backend>,
    pub transport: Arc<CountingTransport>,
    pub api: BistroApi,
}

pub fn harness(backend: Arc<Backend>) -> Harness {
    let transport = CountingTransport::new(backend.router());
    let api = BistroApi::new(transport.clone());
    Harness {
        backend,
        transport,
        api,
    }
}

// ========== Handlers ==========

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, json!({"message": "not found"}))
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", GOOD_TOKEN);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(
            StatusCode::UNAUTHORIZED,
            json!({"msg": "Token has expired"}),
        )),
    }
}

fn id_of(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        for (key, value) in patch {
            if key != "password" && !value.is_null() {
                target.insert(key, value);
            }
        }
    }
}

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.pause().await;
    let username = body.get("username").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    match (username, password) {
        (Some("admin"), Some("secret")) => Json(json!({
            "user": {"id": 1, "name": "Admin", "username": "admin", "role": "admin"},
            "access_token": GOOD_TOKEN,
        }))
        .into_response(),
        (Some("carver"), Some("secret")) => Json(json!({
            "user": {"id": 7, "name": "Carver", "username": "carver", "role": "butcher"},
            "access_token": GOOD_TOKEN,
        }))
        .into_response(),
        _ => error(
            StatusCode::UNAUTHORIZED,
            json!({"msg": "Invalid username or password"}),
        ),
    }
}

async fn list(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Query(filter): Query<HashMap<String, String>>,
) -> Response {
    backend.pause().await;
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }
    if let Some(body) = backend.list_body.lock().clone() {
        return Json(body).into_response();
    }
    let items: Vec<Value> = backend
        .records(&collection)
        .into_iter()
        .filter(|record| {
            filter
                .iter()
                .all(|(key, value)| record.get(key).and_then(Value::as_str) == Some(value))
        })
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn get_one(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    backend.pause().await;
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }
    match backend
        .records(&collection)
        .into_iter()
        .find(|record| id_of(record) == Some(id))
    {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

async fn create(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    backend.pause().await;
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }
    let mut records = backend.records.lock();
    let items = records.entry(collection).or_default();
    let next_id = items.iter().filter_map(id_of).max().unwrap_or(0) + 1;
    let mut record = json!({"id": next_id});
    merge(&mut record, body);
    items.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    backend.pause().await;
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }
    let mut records = backend.records.lock();
    let Some(record) = records
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|record| id_of(record) == Some(id)))
    else {
        return not_found();
    };
    merge(record, body);
    Json(record.clone()).into_response()
}

async fn remove(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    backend.pause().await;
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }
    let mut records = backend.records.lock();
    let Some(items) = records.get_mut(&collection) else {
        return not_found();
    };
    let before = items.len();
    items.retain(|record| id_of(record) != Some(id));
    if items.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
