//! Mock OpenAI-compatible server shared by the integration tests.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test-key";

/// Words the mock embedder knows about; each one is a vector dimension.
const VOCAB: &[&str] = &[
    "pen", "ink", "blue", "notebook", "lined", "pages", "stapler", "metal", "desk",
];

#[derive(Clone, Default)]
pub struct MockState {
    pub embedding_requests: Arc<Mutex<Vec<Value>>>,
    pub chat_requests: Arc<Mutex<Vec<Value>>>,
    /// When set, chat requests answer with this status and no body.
    pub chat_status: Arc<Mutex<Option<StatusCode>>>,
    /// Failures left before chat recovers; `None` fails forever.
    pub chat_failures_left: Arc<Mutex<Option<usize>>>,
}

impl MockState {
    pub fn embedding_calls(&self) -> usize {
        self.embedding_requests.lock().unwrap().len()
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
    }

    pub fn last_chat_request(&self) -> Value {
        self.chat_requests.lock().unwrap().last().cloned().unwrap()
    }

    pub fn fail_chat_with(&self, status: StatusCode) {
        *self.chat_status.lock().unwrap() = Some(status);
        *self.chat_failures_left.lock().unwrap() = None;
    }

    /// Fail the next `times` chat requests with `status`, then answer normally.
    pub fn fail_chat_times(&self, status: StatusCode, times: usize) {
        *self.chat_status.lock().unwrap() = Some(status);
        *self.chat_failures_left.lock().unwrap() = Some(times);
    }

    fn take_chat_failure(&self) -> Option<StatusCode> {
        let mut status = self.chat_status.lock().unwrap();
        let mut left = self.chat_failures_left.lock().unwrap();
        let failing = (*status)?;
        match *left {
            None => Some(failing),
            Some(0) => {
                *status = None;
                None
            }
            Some(n) => {
                *left = Some(n - 1);
                if n == 1 {
                    *status = None;
                }
                Some(failing)
            }
        }
    }
}

pub fn mock_embedding(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    VOCAB
        .iter()
        .map(|v| words.iter().filter(|w| *w == v).count() as f32)
        .collect()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_API_KEY))
        .unwrap_or(false)
}

async fn handle_embeddings(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    state.embedding_requests.lock().unwrap().push(body.clone());

    let inputs: Vec<String> = body["input"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    // reversed on purpose: clients must order by `index`
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .rev()
        .map(|(i, text)| {
            let embedding = mock_embedding(text);
            json!({"object": "embedding", "index": i, "embedding": embedding})
        })
        .collect();

    let model = body["model"].clone();
    Json(json!({"object": "list", "data": data, "model": model})).into_response()
}

async fn handle_chat(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    state.chat_requests.lock().unwrap().push(body.clone());

    if let Some(status) = state.take_chat_failure() {
        return (status, "mock failure").into_response();
    }

    let last = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .and_then(|m| m["content"].as_str())
        .unwrap_or("")
        .to_string();
    let reply = format!("echo: {}", last);
    Json(json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .into_response()
}

/// Start the mock server on an ephemeral port. Returns its `/v1` base URL.
pub async fn spawn_mock_server() -> (String, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/v1/embeddings", post(handle_embeddings))
        .route("/v1/chat/completions", post(handle_chat))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), state)
}

pub const STATIONERY_JSON: &str = r#"[
    {"id": 1, "name": "Pen", "description": "blue ink pen", "price": 2},
    {"id": 2, "name": "Notebook", "description": "lined pages", "price": 5},
    {"id": 3, "name": "Stapler", "description": "metal desk stapler", "price": 12}
]"#;
