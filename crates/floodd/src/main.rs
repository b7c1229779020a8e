//! Flood Daemon - emergency request intake and dispatch
//!
//! Accepts prioritized requests over HTTP, dispatches the most urgent one
//! on demand and keeps a ledger of everything reported.

use anyhow::{Context, Result};
use floodd::config::Config;
use floodd::server::{self, AppState};
use floodd::service::DispatchService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Flood Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let addr = config.listen_addr().context("Invalid listen address")?;

    let service = DispatchService::open(&config.storage)
        .await
        .with_context(|| {
            format!(
                "Failed to open ledger in {}",
                config.storage.logs_dir.display()
            )
        })?;

    server::run(AppState::new(service), addr).await
}
