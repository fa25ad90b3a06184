use std::env;
use std::time::Duration;

use chess_core::PlayerColor;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the coaching backend.
    pub api_url: String,
    pub db_path: String,
    pub player_color: PlayerColor,
    pub reply_delay: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("COACH_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string()),
            db_path: env::var("COACH_DB_PATH").unwrap_or_else(|_| "chess-coach.db".to_string()),
            player_color: env::var("PLAYER_COLOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            reply_delay: Duration::from_millis(
                env::var("REPLY_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),
            request_timeout: Duration::from_secs(
                env::var("COACH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }
}
