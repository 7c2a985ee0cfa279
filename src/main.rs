// src/main.rs

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wellness_api::{
    app,
    config::{AppConfig, DEFAULT_LOG_FILTER},
    storage::MemStorage,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;

    let storage = if config.seed_sample_data {
        MemStorage::with_sample_data()
    } else {
        MemStorage::new()
    };
    let state = AppState::new(storage);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, seeded = config.seed_sample_data, "API listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
