// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use singlestat_math::application::panel_service::PanelService;
use singlestat_math::infrastructure::config::{load_panels_config, load_server_config};
use singlestat_math::infrastructure::display::StandardDisplayProcessor;
use singlestat_math::infrastructure::memory_repository::InMemoryPanelRepository;
use singlestat_math::infrastructure::palette::ThemePalette;
use singlestat_math::presentation::app_state::AppState;
use singlestat_math::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let server_config = load_server_config()?;
    let panels_config = load_panels_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server_config.server.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create repository and collaborators (infrastructure layer)
    tracing::info!("Loaded {} panel(s)", panels_config.panels.len());
    let repository = Arc::new(InMemoryPanelRepository::new(panels_config.panels));
    let display = Arc::new(StandardDisplayProcessor);
    let palette = Arc::new(ThemePalette::new(server_config.palette));

    // Create services (application layer)
    let panel_service = PanelService::new(repository, display, palette);

    // Build router (presentation layer)
    let state = Arc::new(AppState { panel_service });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = server_config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address {}", server_config.server.bind_address))?;
    tracing::info!("Starting singlestat-math service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
