//! ssa-ui library - Solar Site Analyzer UI module
//!
//! Client-side analysis state engine for the site-suitability viewer: holds
//! the authoritative view of sites and scores, manages scoring weights and
//! map filters, derives filtered/sorted views, and orchestrates the async
//! request cycle against the remote scoring service. Scores themselves are
//! computed server-side; this module never calculates suitability.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ssa_common::config::UiConfig;

pub mod api;
pub mod client;
pub mod store;

pub use client::AnalysisClient;
pub use store::SiteStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The analysis state engine, constructed once at app start
    pub store: Arc<SiteStore>,
    /// Resolved process-wide configuration
    pub config: UiConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<SiteStore>, config: UiConfig) -> Self {
        Self { store, config }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ui/config", get(api::get_config))
        .route("/ui/state", get(api::get_state))
        .route("/ui/sites", get(api::get_sites))
        .route("/ui/sites/refresh", post(api::refresh_sites))
        .route("/ui/sites/select", post(api::select_site))
        .route("/ui/statistics", get(api::get_statistics))
        .route(
            "/ui/filters",
            put(api::update_filters).delete(api::reset_filters),
        )
        .route(
            "/ui/weights",
            put(api::update_weights).delete(api::reset_weights),
        )
        .route("/ui/analyze", post(api::analyze))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
