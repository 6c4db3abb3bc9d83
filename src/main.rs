// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardServer;
use crate::application::generators::SyntheticDataGenerator;
use crate::application::random_source::{RandomSource, SeededSource};
use crate::infrastructure::config::load_app_config;
use crate::presentation::app_state::AppState;
use crate::presentation::router::{bind, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Startup failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config().context("failed to load configuration")?;

    // Random source shared by every generator
    let source: Arc<dyn RandomSource> = match config.dashboard.seed {
        Some(seed) => Arc::new(SeededSource::new(seed)),
        None => Arc::new(SeededSource::from_entropy()),
    };
    let generator = SyntheticDataGenerator::new(source);

    let dashboard = Arc::new(DashboardServer::new(&config.dashboard, generator));
    for trigger in dashboard.triggers() {
        tracing::info!(trigger = %trigger.id, period_ms = trigger.period_ms(), "Registered trigger");
    }
    tracing::info!(
        revenue = ?config.dashboard.revenue_refresh,
        heatmap = ?config.dashboard.heatmap_refresh,
        "Refresh policies"
    );

    let state = Arc::new(AppState { dashboard });

    // Start server
    let addr = config.server.socket_addr()?;
    let listener = bind(addr).await?;
    tracing::info!("Starting {} on http://{}", state.dashboard.title(), addr);

    serve(listener, state).await
}
