//! ssa-ui (Solar Site Analyzer UI) - analysis state engine service
//!
//! Serves the engine's HTTP surface for map/chart renderers and forwards
//! analysis work to the remote scoring service.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ssa_common::config::UiConfig;
use ssa_common::types::SiteQuery;
use ssa_ui::{build_router, AnalysisClient, AppState, SiteStore};

/// Command-line overrides; anything unset falls back to environment
/// variables, then compiled defaults
#[derive(Debug, Parser)]
#[command(name = "ssa-ui", version, about = "Solar Site Analyzer UI module")]
struct Args {
    /// Listen port for the UI surface (overrides SSA_UI_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Scoring service base URL (overrides SSA_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Solar Site Analyzer UI (ssa-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = UiConfig::from_env();
    if let Some(port) = args.port {
        config.listen_port = port;
    }
    if let Some(api_url) = args.api_url {
        config.api_base_url = api_url;
    }

    info!("Scoring service: {}", config.api_base_url);

    let client = AnalysisClient::new(config.api_base_url.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create analysis client: {}", e))?;

    // Liveness probe against the scoring service; degraded start is allowed
    match client.health_check().await {
        Ok(health) => info!("✓ Scoring service reachable (status: {})", health.status),
        Err(e) => warn!("Scoring service unreachable at startup: {}", e),
    }

    let store = Arc::new(SiteStore::new(client));

    // Prime the site list; the UI can re-trigger via /ui/sites/refresh
    match store.fetch_sites(&SiteQuery::default()).await {
        Ok(response) => info!("✓ Loaded {} sites", response.sites.len()),
        Err(e) => warn!("Initial site fetch failed: {}", e),
    }

    let state = AppState::new(store, config.clone());
    let app = build_router(state);

    let listener =
        tokio::net::TcpListener::bind(("127.0.0.1", config.listen_port)).await?;
    info!("ssa-ui listening on http://127.0.0.1:{}", config.listen_port);
    info!(
        "Health check: http://127.0.0.1:{}/health",
        config.listen_port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
