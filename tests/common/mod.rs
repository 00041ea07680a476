//! In-process memo API for integration tests. Every request is recorded so
//! tests can check exactly what the client sent.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use regex::Regex;
use serde_json::{json, Value};

use memo_client::{Alert, ApiClient, Config, MemoApp, PasswordMode};

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Debug)]
struct StoredMemo {
    id: i64,
    content: String,
    password: String,
}

/// Canned answer for the next list, create, delete or edit request.
#[derive(Clone, Debug)]
pub enum Failure {
    /// Status with an `{error}` body.
    Error(StatusCode, String),
    /// Status with a plain-text body.
    Plain(StatusCode),
    /// Status with an arbitrary JSON body.
    Body(StatusCode, Value),
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Self::Error(status, message) => error(status, &message).into_response(),
            Self::Plain(status) => (status, "something broke").into_response(),
            Self::Body(status, body) => (status, Json(body)).into_response(),
        }
    }
}

#[derive(Default)]
struct Store {
    memos: Vec<StoredMemo>,
    next_id: i64,
    requests: Vec<Recorded>,
    fail_next: Option<Failure>,
}

type Shared = Arc<Mutex<Store>>;

pub struct MockApi {
    pub base: String,
    store: Shared,
}

impl MockApi {
    pub async fn start() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store {
            next_id: 1,
            ..Store::default()
        }));

        let app = Router::new()
            .route("/memos", get(list_memos).post(create_memo))
            .route("/memos/:id", put(edit_memo).delete(delete_memo))
            .route("/category", get(list_categories))
            .route("/category/:name", get(category_memos))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            store,
        }
    }

    /// Stores a memo directly; `password` is kept exactly as given.
    pub fn seed(&self, content: &str, password: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id;
        store.next_id += 1;
        store.memos.push(StoredMemo {
            id,
            content: content.into(),
            password: password.into(),
        });
        id
    }

    pub fn set_next_id(&self, id: i64) {
        self.store.lock().unwrap().next_id = id;
    }

    pub fn fail_next(&self, failure: Failure) {
        self.store.lock().unwrap().fail_next = Some(failure);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.store.lock().unwrap().requests.clear();
    }

    pub fn stored_content(&self, id: i64) -> Option<String> {
        let store = self.store.lock().unwrap();
        store.memos.iter().find(|m| m.id == id).map(|m| m.content.clone())
    }

    pub fn client(&self, mode: PasswordMode) -> ApiClient {
        let config = Config {
            api_base: self.base.clone(),
            password_mode: mode,
            timeout_secs: 5,
        };
        ApiClient::new(&config).unwrap()
    }

    pub async fn app(&self, mode: PasswordMode) -> (MemoApp<RecordingAlert>, RecordingAlert) {
        let alerts = RecordingAlert::default();
        let mut app = MemoApp::new(self.client(mode), alerts.clone());
        app.load().await.unwrap();
        self.clear_requests();
        (app, alerts)
    }
}

#[derive(Clone, Default)]
pub struct RecordingAlert(Arc<Mutex<Vec<String>>>);

impl RecordingAlert {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// Base URL of a port nothing listens on.
pub fn closed_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn closed_client() -> ApiClient {
    let config = Config {
        api_base: closed_base(),
        password_mode: PasswordMode::Digest,
        timeout_secs: 2,
    };
    ApiClient::new(&config).unwrap()
}

fn record(store: &mut Store, method: Method, uri: &Uri, body: Option<Value>) {
    store.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body,
    });
}

fn hashtags(content: &str) -> Vec<String> {
    let re = Regex::new(r"#\w+").unwrap();
    re.find_iter(content).map(|m| m.as_str().to_string()).collect()
}

fn memo_json(memo: &StoredMemo) -> Value {
    json!({ "id": memo.id, "content": memo.content })
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

async fn list_memos(State(store): State<Shared>, uri: Uri) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::GET, &uri, None);

    if let Some(failure) = store.fail_next.take() {
        return failure.into_response();
    }
    Json(Value::Array(store.memos.iter().map(memo_json).collect())).into_response()
}

async fn create_memo(
    State(store): State<Shared>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::POST, &uri, Some(body.clone()));

    if let Some(failure) = store.fail_next.take() {
        return failure.into_response();
    }

    let content = body["content"].as_str().unwrap_or_default().to_string();
    if content.is_empty() {
        return error(StatusCode::BAD_REQUEST, "content is empty").into_response();
    }

    let id = store.next_id;
    store.next_id += 1;
    store.memos.push(StoredMemo {
        id,
        content: content.clone(),
        password: body["password"].as_str().unwrap_or_default().to_string(),
    });

    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "content": content, "hashtags": hashtags(&content) })),
    )
        .into_response()
}

async fn delete_memo(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::DELETE, &uri, Some(body.clone()));

    if let Some(failure) = store.fail_next.take() {
        return failure.into_response();
    }

    let Some(pos) = store.memos.iter().position(|m| m.id == id) else {
        return error(StatusCode::NOT_FOUND, "memo does not exist").into_response();
    };
    if store.memos[pos].password != body["password"].as_str().unwrap_or_default() {
        return error(StatusCode::FORBIDDEN, "wrong password").into_response();
    }

    let memo = store.memos.remove(pos);
    (StatusCode::OK, Json(json!({ "deleted": memo_json(&memo) }))).into_response()
}

async fn edit_memo(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::PUT, &uri, Some(body.clone()));

    if let Some(failure) = store.fail_next.take() {
        return failure.into_response();
    }

    let Some(memo) = store.memos.iter_mut().find(|m| m.id == id) else {
        return error(StatusCode::NOT_FOUND, "memo does not exist").into_response();
    };
    if memo.password != body["password"].as_str().unwrap_or_default() {
        return error(StatusCode::FORBIDDEN, "wrong password").into_response();
    }

    memo.content = body["content"].as_str().unwrap_or_default().to_string();
    let updated = memo_json(memo);
    (StatusCode::OK, Json(updated)).into_response()
}

async fn list_categories(State(store): State<Shared>, uri: Uri) -> Json<Value> {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::GET, &uri, None);

    let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for memo in &store.memos {
        for tag in hashtags(&memo.content) {
            categories
                .entry(tag.trim_start_matches('#').to_string())
                .or_default()
                .insert(tag);
        }
    }

    Json(json!({ "categories": categories }))
}

async fn category_memos(
    State(store): State<Shared>,
    Path(name): Path<String>,
    uri: Uri,
) -> (StatusCode, Json<Value>) {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::GET, &uri, None);

    let tag = format!("#{name}");
    let memos: Vec<Value> = store
        .memos
        .iter()
        .filter(|m| hashtags(&m.content).contains(&tag))
        .map(memo_json)
        .collect();

    if memos.is_empty() {
        return error(StatusCode::NOT_FOUND, "category does not exist");
    }
    (StatusCode::OK, Json(Value::Array(memos)))
}
