use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use chess_core::analysis::GameAnalysis;
use chess_core::coaching::ChatMessage;
use chess_core::pgn;
use chess_core::{GameOutcome, PlayerColor};
use serde::{Deserialize, Serialize};

use crate::clients::anthropic::CoachClient;
use crate::error::AppError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeGameRequest {
    pub pgn: Option<String>,
    pub player_color: Option<String>,
    pub result: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub fen: Option<String>,
    pub player_color: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionRequest {
    pub games_summary: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ReflectionResponse {
    pub reflection: String,
}

/// Unwrap a JSON body, turning any extractor rejection into a 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

/// A present, non-blank string field.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

/// POST /api/analyze-game
pub async fn analyze_game(
    Extension(coach): Extension<Arc<CoachClient>>,
    payload: Result<Json<AnalyzeGameRequest>, JsonRejection>,
) -> Result<Json<GameAnalysis>, AppError> {
    let req = body(payload)?;
    let (Some(pgn_text), Some(color), Some(result)) = (
        required(req.pgn),
        required(req.player_color),
        required(req.result),
    ) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };

    let color: PlayerColor = color.parse().map_err(AppError::BadRequest)?;
    let result: GameOutcome = result.parse().map_err(AppError::BadRequest)?;

    tracing::info!(
        plies = pgn::extract_moves(&pgn_text).len(),
        color = %color,
        result = %result,
        "Analyzing game"
    );

    let analysis = coach
        .analyze_game(&pgn_text, color.as_str(), result.as_str())
        .await
        .map_err(AppError::upstream("Failed to analyze game"))?;

    Ok(Json(analysis))
}

/// POST /api/chat
pub async fn chat(
    Extension(coach): Extension<Arc<CoachClient>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let req = body(payload)?;
    let message =
        required(req.message).ok_or_else(|| AppError::BadRequest("Message is required".into()))?;

    let response = coach
        .chat(&message, &req.conversation_history)
        .await
        .map_err(AppError::upstream("Failed to process chat message"))?;

    Ok(Json(ChatResponse { response }))
}

/// POST /api/hint
pub async fn hint(
    Extension(coach): Extension<Arc<CoachClient>>,
    payload: Result<Json<HintRequest>, JsonRejection>,
) -> Result<Json<HintResponse>, AppError> {
    let req = body(payload)?;
    let (Some(fen), Some(color)) = (required(req.fen), required(req.player_color)) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };
    let color: PlayerColor = color.parse().map_err(AppError::BadRequest)?;

    let hint = coach
        .hint(&fen, color.as_str())
        .await
        .map_err(AppError::upstream("Failed to generate hint"))?;

    Ok(Json(HintResponse { hint }))
}

/// POST /api/weekly-reflection
pub async fn weekly_reflection(
    Extension(coach): Extension<Arc<CoachClient>>,
    payload: Result<Json<ReflectionRequest>, JsonRejection>,
) -> Result<Json<ReflectionResponse>, AppError> {
    let req = body(payload)?;
    let summary = required(req.games_summary)
        .ok_or_else(|| AppError::BadRequest("Games summary is required".into()))?;

    let reflection = coach
        .weekly_reflection(&summary)
        .await
        .map_err(AppError::upstream("Failed to generate reflection"))?;

    Ok(Json(ReflectionResponse { reflection }))
}
