use chess_core::analysis::GameAnalysis;
use chess_core::coaching::ChatMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::prompts::{self, PromptTemplate};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The service answered, but not with text.
    #[error("Unexpected response format: {0}")]
    UnexpectedContent(String),
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Bridge to the hosted model for analysis, chat, hints and reflections.
pub struct CoachClient {
    client: Client,
    messages_url: String,
    api_key: String,
    model: String,
}

impl CoachClient {
    pub fn new(config: &Config) -> Result<Self, CoachError> {
        let client = Client::builder()
            .user_agent("ChessCoach/1.0")
            .timeout(std::time::Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            messages_url: format!("{}/v1/messages", config.anthropic_base_url.trim_end_matches('/')),
            api_key: config.anthropic_api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Send one conversation and return the text of the first content block.
    async fn complete(
        &self,
        template: &PromptTemplate,
        messages: &[ChatMessage],
    ) -> Result<String, CoachError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: template.max_tokens,
            system: template.system,
            messages,
        };

        let resp = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoachError::Status { status, body });
        }

        let data: MessagesResponse = resp.json().await?;
        match data.content.into_iter().next() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Other) => Err(CoachError::UnexpectedContent(
                "first content block is not text".into(),
            )),
            None => Err(CoachError::UnexpectedContent("no content blocks".into())),
        }
    }

    /// Review a finished game. Unstructured replies degrade to a summary-only analysis.
    pub async fn analyze_game(
        &self,
        pgn: &str,
        player_color: &str,
        result: &str,
    ) -> Result<GameAnalysis, CoachError> {
        let prompt = prompts::GAME_ANALYSIS.render(&[
            ("pgn", pgn),
            ("player_color", player_color),
            ("result", result),
        ]);
        let text = self
            .complete(&prompts::GAME_ANALYSIS, &[ChatMessage::user(prompt)])
            .await?;
        Ok(GameAnalysis::parse_or_fallback(&text))
    }

    /// Continue a coaching conversation with a new user message.
    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, CoachError> {
        let mut messages = history.to_vec();
        messages.push(ChatMessage::user(prompts::COACH_CHAT.render(&[("message", message)])));
        self.complete(&prompts::COACH_CHAT, &messages).await
    }

    pub async fn hint(&self, fen: &str, player_color: &str) -> Result<String, CoachError> {
        let prompt = prompts::HINT_GENERATION.render(&[("fen", fen), ("player_color", player_color)]);
        self.complete(&prompts::HINT_GENERATION, &[ChatMessage::user(prompt)])
            .await
    }

    pub async fn weekly_reflection(&self, games_summary: &str) -> Result<String, CoachError> {
        let prompt = prompts::WEEKLY_REFLECTION.render(&[("games_summary", games_summary)]);
        self.complete(&prompts::WEEKLY_REFLECTION, &[ChatMessage::user(prompt)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_blocks() {
        let data: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","content":[{"type":"text","text":"Develop your knights."}]}"#,
        )
        .unwrap();
        assert!(matches!(&data.content[0], ContentBlock::Text { text } if text == "Develop your knights."));

        let data: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"t1","name":"x","input":{}}]}"#,
        )
        .unwrap();
        assert!(matches!(data.content[0], ContentBlock::Other));
    }

    #[test]
    fn test_messages_url_trims_slash() {
        let config = Config {
            anthropic_api_key: "key".into(),
            anthropic_base_url: "http://127.0.0.1:9999/".into(),
            model: "test-model".into(),
            upstream_timeout_secs: 5,
            host: "127.0.0.1".into(),
            port: 0,
        };
        let client = CoachClient::new(&config).unwrap();
        assert_eq!(client.messages_url, "http://127.0.0.1:9999/v1/messages");
    }
}
