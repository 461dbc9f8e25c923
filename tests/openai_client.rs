//! OpenAiClient against a local chat-completions server

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use contract_analyzer::config::Config;
use contract_analyzer::error::ContractAnalyzerError;
use contract_analyzer::llm::{CompletionClient, CompletionRequest, OpenAiClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn completions(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().push((auth.clone(), body));

    if auth.as_deref() != Some("Bearer sk-good") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Pihak: A dan B"}, "finish_reason": "stop"}
            ]
        })),
    )
}

async fn spawn_server() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), seen)
}

fn client_for(base_url: &str) -> OpenAiClient {
    let mut config = Config::default().completion;
    config.base_url = base_url.to_string();
    config.timeout_secs = 10;
    OpenAiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_posts_chat_payload_and_returns_first_choice() {
    let (base_url, seen) = spawn_server().await;
    let client = client_for(&base_url);
    let request = CompletionRequest::for_prompt("gpt-3.5-turbo", 0.5, "Sebutkan pihak");

    let text = client.complete("sk-good", &request).await.unwrap();
    assert_eq!(text, "Pihak: A dan B");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-good"));
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(body["messages"][1]["content"], "Sebutkan pihak");
}

#[tokio::test]
async fn test_rejected_key_maps_to_authentication_error() {
    let (base_url, seen) = spawn_server().await;
    let client = client_for(&base_url);
    let request = CompletionRequest::for_prompt("gpt-3.5-turbo", 0.5, "Ringkas");

    let err = client.complete("sk-bad", &request).await.unwrap_err();
    match err {
        ContractAnalyzerError::Authentication(message) => assert_eq!(message, "Incorrect API key provided"),
        other => panic!("unexpected error: {:?}", other),
    }
    // No retry after a failure
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/v1", addr));
    let request = CompletionRequest::for_prompt("gpt-3.5-turbo", 0.5, "Ringkas");

    let err = client.complete("sk-good", &request).await.unwrap_err();
    assert!(matches!(err, ContractAnalyzerError::Network(_)));
}

#[tokio::test]
async fn test_blank_key_never_sent() {
    let (base_url, seen) = spawn_server().await;
    let client = client_for(&base_url);
    let request = CompletionRequest::for_prompt("gpt-3.5-turbo", 0.5, "Ringkas");

    let err = client.complete("  ", &request).await.unwrap_err();
    assert!(matches!(err, ContractAnalyzerError::MissingApiKey));
    assert!(seen.lock().unwrap().is_empty());
}
