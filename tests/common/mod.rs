#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use server::clients::anthropic::CoachClient;
use server::config::Config;

pub const API_KEY: &str = "test-key";

/// How the fake model service answers every request.
#[derive(Clone)]
pub enum Upstream {
    Text(String),
    NonText,
    Status(u16),
}

/// A request the fake model service received.
#[derive(Clone, Debug)]
pub struct Captured {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Fake {
    upstream: Upstream,
    seen: Arc<Mutex<Vec<Captured>>>,
}

async fn messages(
    Extension(fake): Extension<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);
    fake.seen.lock().unwrap().push(Captured {
        api_key: header("x-api-key"),
        version: header("anthropic-version"),
        body,
    });

    match fake.upstream {
        Upstream::Text(text) => (
            StatusCode::OK,
            Json(json!({
                "id": "msg_test",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": text}],
            })),
        ),
        Upstream::NonText => (
            StatusCode::OK,
            Json(json!({
                "content": [{"type": "tool_use", "id": "tu_1", "name": "lookup", "input": {}}],
            })),
        ),
        Upstream::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({"type": "error", "error": {"type": "api_error", "message": "boom"}})),
        ),
    }
}

/// A running backend wired to a fake model service.
pub struct TestApp {
    pub base_url: String,
    pub seen: Arc<Mutex<Vec<Captured>>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Requests forwarded to the model service so far.
    pub fn captured(&self) -> Vec<Captured> {
        self.seen.lock().unwrap().clone()
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn spawn_app(upstream: Upstream) -> TestApp {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let fake = Router::new()
        .route("/v1/messages", post(messages))
        .layer(Extension(Fake {
            upstream,
            seen: seen.clone(),
        }));
    let upstream_url = serve(fake).await;

    let config = Config {
        anthropic_api_key: API_KEY.into(),
        anthropic_base_url: upstream_url,
        model: "test-model".into(),
        upstream_timeout_secs: 5,
        host: "127.0.0.1".into(),
        port: 0,
    };
    let coach = Arc::new(CoachClient::new(&config).unwrap());
    let base_url = serve(server::app(coach)).await;

    TestApp { base_url, seen }
}

pub async fn spawn_text(text: &str) -> TestApp {
    spawn_app(Upstream::Text(text.to_string())).await
}

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

pub const STRUCTURED_ANALYSIS: &str = r#"{
    "summary": "You lost to an early queen raid after weakening your king.",
    "keyMoments": [
        {"moveNumber": 2, "move": "g4", "type": "blunder", "description": "Opens the e1-h4 diagonal", "evaluation": -99}
    ],
    "suggestions": ["Avoid moving the f and g pawns early"],
    "recurringPatterns": ["King safety"],
    "strengthsAndWeaknesses": {"strengths": [], "weaknesses": ["Opening principles"]}
}"#;

pub const FOOLS_MATE_PGN: &str = "1. f3 e5 2. g4 Qh4# 0-1";
