//! Integration tests for `GatewayClient` against a local fake gateway.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pixmorph_gateway::{GatewayClient, GatewayConfig, GatewayError};
use serde_json::{json, Value};

#[derive(Clone)]
struct Fake {
    status: StatusCode,
    reply: Value,
    seen_body: Arc<Mutex<Option<Value>>>,
    seen_auth: Arc<Mutex<Option<String>>>,
}

async fn completions(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *fake.seen_body.lock().unwrap() = Some(body);
    *fake.seen_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (fake.status, Json(fake.reply.clone()))
}

/// Serve a fake gateway on an ephemeral port and return its URL.
async fn spawn_fake(fake: Fake) -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

fn fake(status: StatusCode, reply: Value) -> Fake {
    Fake {
        status,
        reply,
        seen_body: Arc::default(),
        seen_auth: Arc::default(),
    }
}

fn image_reply(url: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "images": [{ "type": "image_url", "image_url": { "url": url } }]
            }
        }]
    })
}

#[tokio::test]
async fn returns_image_url_and_sends_bearer_key() {
    let fake = fake(StatusCode::OK, image_reply("https://cdn.example.com/result.png"));
    let url = spawn_fake(fake.clone()).await;
    let client = GatewayClient::new(GatewayConfig::new(url, Some("secret-key".into()))).unwrap();

    let images = vec![
        "data:image/png;base64,AAA=".to_string(),
        "data:image/jpeg;base64,BBB=".to_string(),
    ];
    let result = client
        .generate(&images, "Apply warm sunset color grading")
        .await
        .unwrap();

    assert_eq!(result, "https://cdn.example.com/result.png");
    assert_eq!(
        fake.seen_auth.lock().unwrap().as_deref(),
        Some("Bearer secret-key")
    );

    let body = fake.seen_body.lock().unwrap().clone().unwrap();
    let content = body["messages"][0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 3);
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,AAA=");
    assert_eq!(content[2]["image_url"]["url"], "data:image/jpeg;base64,BBB=");
}

#[tokio::test]
async fn upstream_failure_carries_status_and_body() {
    let fake = fake(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": "rate limited"}),
    );
    let url = spawn_fake(fake).await;
    let client = GatewayClient::new(GatewayConfig::new(url, Some("k".into()))).unwrap();

    let err = client
        .generate(&["data:image/png;base64,AAA=".into()], "p")
        .await
        .unwrap_err();

    assert_matches!(&err, GatewayError::Api { status: 429, body } if body.contains("rate limited"));
    assert_eq!(err.to_string(), "AI Gateway error: 429");
}

#[tokio::test]
async fn success_without_image_is_an_error() {
    let fake = fake(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "text only"}}]}),
    );
    let url = spawn_fake(fake).await;
    let client = GatewayClient::new(GatewayConfig::new(url, Some("k".into()))).unwrap();

    let err = client
        .generate(&["data:image/png;base64,AAA=".into()], "p")
        .await
        .unwrap_err();
    assert_matches!(err, GatewayError::MissingImageUrl);
}

#[tokio::test]
async fn missing_key_fails_without_calling_upstream() {
    let fake = fake(StatusCode::OK, image_reply("https://cdn/x.png"));
    let url = spawn_fake(fake.clone()).await;
    let client = GatewayClient::new(GatewayConfig::new(url, None)).unwrap();

    let err = client
        .generate(&["data:image/png;base64,AAA=".into()], "p")
        .await
        .unwrap_err();

    assert_matches!(err, GatewayError::MissingApiKey);
    assert!(fake.seen_body.lock().unwrap().is_none());
}

#[tokio::test]
async fn non_json_success_body_is_malformed_response() {
    let app = Router::new().route("/v1/chat/completions", post(|| async { "<html>ok</html>" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = GatewayClient::new(GatewayConfig::new(
        format!("http://{addr}/v1/chat/completions"),
        Some("k".into()),
    ))
    .unwrap();

    let err = client
        .generate(&["data:image/png;base64,AAA=".into()], "p")
        .await
        .unwrap_err();

    assert_matches!(err, GatewayError::MalformedResponse(_));
}
