//! HTTP client for the coaching backend.

use std::time::Duration;

use chess_core::analysis::GameAnalysis;
use chess_core::coaching::ChatMessage;
use chess_core::{GameOutcome, PlayerColor};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{context} (HTTP {status})")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
    },
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Deserialize)]
struct HintReply {
    hint: String,
}

pub struct CoachApi {
    client: Client,
    base_url: String,
}

impl CoachApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("ChessCoachPlay/1.0")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: Value,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let resp = self.client.post(self.url(path)).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                context,
                status: resp.status(),
            });
        }
        Ok(resp.json().await?)
    }

    pub async fn analyze_game(
        &self,
        pgn: &str,
        player_color: PlayerColor,
        result: GameOutcome,
    ) -> Result<GameAnalysis, ApiError> {
        self.post(
            "/api/analyze-game",
            json!({ "pgn": pgn, "playerColor": player_color, "result": result }),
            "Failed to analyze game",
        )
        .await
    }

    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, ApiError> {
        let reply: ChatReply = self
            .post(
                "/api/chat",
                json!({ "message": message, "conversationHistory": history }),
                "Failed to send chat message",
            )
            .await?;
        Ok(reply.response)
    }

    pub async fn hint(&self, fen: &str, player_color: PlayerColor) -> Result<String, ApiError> {
        let reply: HintReply = self
            .post(
                "/api/hint",
                json!({ "fen": fen, "playerColor": player_color }),
                "Failed to get hint",
            )
            .await?;
        Ok(reply.hint)
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        let resp = self.client.get(self.url("/api/health")).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                context: "API health check failed",
                status: resp.status(),
            });
        }
        Ok(resp.json().await?)
    }
}
