//! Trip Planner - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the trip planning form and API.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_planner::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_planner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    if config.api_key.is_none() {
        warn!("OPENROUTER_API_KEY is not set; trip planning will be disabled until it is provided");
    }
    if config.weather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY is not set; the weather tool will fall back to a generic advisory");
    }

    // Start HTTP server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    api::serve(config).await?;

    Ok(())
}
