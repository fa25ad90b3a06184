use axum::Json;
use serde_json::{json, Value as JsonValue};

/// GET /api/health
pub async fn health_check() -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /
pub async fn index() -> Json<JsonValue> {
    Json(json!({
        "message": "Chess Coach API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "analyzeGame": "POST /api/analyze-game",
            "chat": "POST /api/chat",
            "hint": "POST /api/hint",
            "weeklyReflection": "POST /api/weekly-reflection",
        },
    }))
}
