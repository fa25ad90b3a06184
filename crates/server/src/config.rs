use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub model: String,
    pub upstream_timeout_secs: u64,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        if anthropic_api_key.is_empty() {
            tracing::warn!("ANTHROPIC_API_KEY is not set - coaching requests will fail upstream");
        }

        Self {
            anthropic_api_key,
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            model: env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
        }
    }
}
