#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use pixmorph_client::dispatcher::ProxyClient;
use pixmorph_client::history::HistoryClient;
use pixmorph_client::session::Session;
use serde_json::{json, Value};
use uuid::Uuid;

pub const RESULT_URL: &str = "https://cdn.example.com/generated.png";

/// In-memory stand-in for `pixmorph-api`.
#[derive(Clone)]
pub struct FakeApi {
    pub generate_status: StatusCode,
    pub generate_reply: Value,
    pub generate_delay: Option<Duration>,
    pub history_status: Arc<Mutex<StatusCode>>,
    pub generate_calls: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    pub history: Arc<Mutex<Vec<Value>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            generate_status: StatusCode::OK,
            generate_reply: json!({ "imageUrl": RESULT_URL }),
            generate_delay: None,
            history_status: Arc::new(Mutex::new(StatusCode::OK)),
            generate_calls: Arc::default(),
            history: Arc::default(),
        }
    }
}

impl FakeApi {
    pub fn generate_count(&self) -> usize {
        self.generate_calls.lock().unwrap().len()
    }

    pub fn last_generate(&self) -> Option<(Option<String>, Value)> {
        self.generate_calls.lock().unwrap().last().cloned()
    }

    /// Make every history endpoint answer `status` from now on.
    pub fn fail_history(&self, status: StatusCode) {
        *self.history_status.lock().unwrap() = status;
    }

    fn history_failure(&self) -> Option<StatusCode> {
        let status = *self.history_status.lock().unwrap();
        (!status.is_success()).then_some(status)
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn seed_history(&self, user_id: Uuid, prompts: &[&str]) -> Vec<Uuid> {
        let mut rows = self.history.lock().unwrap();
        prompts
            .iter()
            .map(|prompt| {
                let id = Uuid::new_v4();
                rows.push(json!({
                    "id": id,
                    "user_id": user_id,
                    "original_image_url": null,
                    "generated_image_url": RESULT_URL,
                    "prompt": prompt,
                    "created_at": "2025-01-01T00:00:00Z",
                }));
                id
            })
            .collect()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn generate(
    State(fake): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.generate_calls
        .lock()
        .unwrap()
        .push((bearer(&headers), body));
    if let Some(delay) = fake.generate_delay {
        tokio::time::sleep(delay).await;
    }
    (fake.generate_status, Json(fake.generate_reply.clone()))
}

async fn list_history(State(fake): State<FakeApi>) -> (StatusCode, Json<Value>) {
    if let Some(status) = fake.history_failure() {
        return (status, Json(json!({"error": "history down", "code": "INTERNAL_ERROR"})));
    }
    let rows = fake.history.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({ "data": rows })))
}

async fn create_history(
    State(fake): State<FakeApi>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(status) = fake.history_failure() {
        return (status, Json(json!({"error": "history down", "code": "INTERNAL_ERROR"})));
    }
    let row = json!({
        "id": Uuid::new_v4(),
        "user_id": Uuid::nil(),
        "original_image_url": body.get("original_image_url").cloned().unwrap_or(Value::Null),
        "generated_image_url": body["generated_image_url"],
        "prompt": body["prompt"],
        "created_at": "2025-01-01T00:00:00Z",
    });
    fake.history.lock().unwrap().insert(0, row.clone());
    (StatusCode::CREATED, Json(json!({ "data": row })))
}

async fn delete_history(State(fake): State<FakeApi>, Path(id): Path<Uuid>) -> StatusCode {
    if let Some(status) = fake.history_failure() {
        return status;
    }
    let mut rows = fake.history.lock().unwrap();
    let before = rows.len();
    rows.retain(|r| r["id"] != json!(id));
    if rows.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Serve `fake` on an ephemeral port and return its base URL.
pub async fn spawn_api(fake: FakeApi) -> String {
    let app = Router::new()
        .route("/api/v1/generate-image", post(generate))
        .route("/api/v1/history", get(list_history).post(create_history))
        .route("/api/v1/history/{id}", delete(delete_history))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn clients(base_url: &str) -> (ProxyClient, HistoryClient) {
    let http = reqwest::Client::new();
    (
        ProxyClient::new(http.clone(), base_url),
        HistoryClient::new(http, base_url),
    )
}

pub fn session() -> Session {
    Session {
        user_id: Uuid::new_v4(),
        email: Some("user@example.com".into()),
        access_token: "test-access-token".into(),
    }
}
