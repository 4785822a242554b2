//! Conveyor - Main Entry Point
//! Registers job handlers, subscribes them and waits for shutdown

mod bootstrap;
mod constants;
mod handlers;
mod logging;
mod settings;

use anyhow::Result;
use tracing::info;

use conveyor_infra_memory::MemoryQueueBackend;

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::settings::DaemonConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let _log_guard = logging::init_logging()?;

    info!("Conveyor v{} starting...", VERSION);

    // 2. Load configuration
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned());
    info!(config_path = %config_path, "Loading configuration...");
    let config = DaemonConfig::load(&config_path)?;

    // 3. Wire registry + backend, run startup (fails hard on any queue)
    let backend = MemoryQueueBackend::new();
    let mut service = bootstrap::start(&config, &backend).await?;

    info!("System ready. Waiting for jobs...");
    info!("Press Ctrl+C to shutdown");

    // 4. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 5. Graceful shutdown
    service.shut_down().await?;

    info!("Shutdown complete.");

    Ok(())
}
