use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::clients::anthropic::CoachError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Upstream coaching failure; the message is what the caller sees.
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: CoachError,
    },
}

impl AppError {
    pub fn upstream(message: &'static str) -> impl FnOnce(CoachError) -> AppError {
        move |source| AppError::Upstream { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream { message, source } => {
                tracing::error!("{message}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
