use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitt_mukti::{
    api::{start_server, ApiState},
    auth::build_auth_service,
    config::AppConfig,
    learning::InMemoryProgressStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("🚀 Vitt Mukti - API Server");
    info!("📍 Port: {}", config.port);
    info!("⏱️  Chat reply delay: {:?}", config.chat_reply_delay);

    // Create components
    let auth = build_auth_service(&config);
    let progress = Arc::new(InMemoryProgressStore::new());
    let state = ApiState::new(&config, progress, auth);

    info!("📡 Starting API server...");

    start_server(state, config.port).await?;

    Ok(())
}
