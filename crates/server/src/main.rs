use std::sync::Arc;

use server::clients::anthropic::CoachClient;
use server::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();
    tracing::info!("Using model {} at {}", config.model, config.anthropic_base_url);

    let coach = Arc::new(CoachClient::new(&config)?);
    let app = server::app(coach);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Chess Coach API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
