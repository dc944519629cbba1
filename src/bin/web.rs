use anyhow::{Context, Result};
use nashboard::{
    build_router, AppState, MemoryStore, ServerConfig, SlateService, SportsConfig, Store,
};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server_config = ServerConfig::from_env();
    let sports_config = SportsConfig::from_env();

    if sports_config.api_key.is_none() {
        warn!("SPORTS_API_KEY not set, slates will use demo data");
    }

    let store: Arc<dyn Store> = match &server_config.data_file {
        Some(path) => {
            info!(path = %path.display(), "using JSON snapshot store");
            Arc::new(
                MemoryStore::open(path)
                    .await
                    .with_context(|| format!("Failed to open store at {}", path.display()))?,
            )
        }
        None => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let slates = SlateService::new(Client::new(), sports_config);
    let app = build_router(AppState::new(slates, store));

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("NashBoard API listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
