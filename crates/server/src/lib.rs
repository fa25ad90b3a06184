pub mod clients;
pub mod config;
pub mod error;
pub mod prompts;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use clients::anthropic::CoachClient;

/// Build the HTTP router around a shared coaching client.
pub fn app(coach: Arc<CoachClient>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::index))
        .route("/api/health", get(routes::health::health_check))
        .route("/api/analyze-game", post(routes::coach::analyze_game))
        .route("/api/chat", post(routes::coach::chat))
        .route("/api/hint", post(routes::coach::hint))
        .route("/api/weekly-reflection", post(routes::coach::weekly_reflection))
        .layer(Extension(coach))
        .layer(cors)
}
