use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use backup_webapi::app_state::build_app_state;
use backup_webapi::config::AppConfig;
use backup_webapi::core::state::log_buffer::memory_log_buffer::MemoryLogBuffer;
use backup_webapi::logging::init_logging;
use backup_webapi::routes::app_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let log_buffer = Arc::new(MemoryLogBuffer::new(config.log_buffer_capacity));
    let _guard = init_logging(&config, log_buffer.clone());
    for warning in &config.warnings {
        warn!("{warning}");
    }

    let state = build_app_state(&config, log_buffer)?;
    let app = app_router().with_state(state);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("🚀 Listening on {} (database: {})", config.bind, config.db_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
