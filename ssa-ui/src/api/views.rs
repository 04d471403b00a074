//! Read-only views over the store
//!
//! Derived views are recomputed from current store state on every request;
//! band color/label annotations are produced per item at read time and never
//! stored.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ssa_common::score::ScoreBand;
use ssa_common::types::{AnalysisWeights, MapFilters, Site, SiteDetail};

use super::remote_failure;
use crate::AppState;

/// One palette entry
#[derive(Debug, Serialize)]
pub struct BandView {
    pub band: ScoreBand,
    pub color: &'static str,
    pub label: &'static str,
}

/// Render bootstrap: map settings and the score palette
#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub map_token: String,
    pub map_center: [f64; 2],
    pub map_zoom: f64,
    pub score_bands: Vec<BandView>,
}

/// GET /ui/config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigView> {
    let score_bands = ScoreBand::ALL
        .iter()
        .map(|band| BandView {
            band: *band,
            color: band.color(),
            label: band.label(),
        })
        .collect();

    Json(ConfigView {
        map_token: state.config.map_token.clone(),
        map_center: state.config.map_center,
        map_zoom: state.config.map_zoom,
        score_bands,
    })
}

/// Snapshot of engine state for a global indicator bar
#[derive(Debug, Serialize)]
pub struct StateView {
    pub loading: bool,
    pub analyzing: bool,
    pub error: Option<String>,
    pub weights: AnalysisWeights,
    pub filters: MapFilters,
    pub total_sites: usize,
    pub analyzed_sites: usize,
    pub selected_site: Option<Site>,
    pub selected_site_detail: Option<SiteDetail>,
}

/// GET /ui/state
pub async fn get_state(State(state): State<AppState>) -> Json<StateView> {
    let store = &state.store;

    Json(StateView {
        loading: store.is_loading(),
        analyzing: store.is_analyzing(),
        error: store.last_error(),
        weights: store.weights(),
        filters: store.filters(),
        total_sites: store.total_sites(),
        analyzed_sites: store.analyzed_sites(),
        selected_site: store.selected_site(),
        selected_site_detail: store.selected_site_detail(),
    })
}

/// Site annotated with its score band for rendering
#[derive(Debug, Serialize)]
pub struct SiteView {
    #[serde(flatten)]
    pub site: Site,
    pub score_band: ScoreBand,
    pub score_color: &'static str,
    pub score_label: &'static str,
}

impl From<Site> for SiteView {
    fn from(site: Site) -> Self {
        let band = ScoreBand::classify(site.total_suitability_score);
        Self {
            site,
            score_band: band,
            score_color: band.color(),
            score_label: band.label(),
        }
    }
}

/// Filtered, score-ordered site list plus unfiltered counts
#[derive(Debug, Serialize)]
pub struct SitesView {
    pub total_sites: usize,
    pub analyzed_sites: usize,
    pub sites: Vec<SiteView>,
}

/// GET /ui/sites
pub async fn get_sites(State(state): State<AppState>) -> Json<SitesView> {
    let store = &state.store;

    Json(SitesView {
        total_sites: store.total_sites(),
        analyzed_sites: store.analyzed_sites(),
        sites: store.sorted_sites().into_iter().map(SiteView::from).collect(),
    })
}

/// GET /ui/statistics
///
/// Fetches fresh aggregate statistics from the scoring service and returns
/// them; the store keeps the copy for subsequent state reads.
pub async fn get_statistics(State(state): State<AppState>) -> Response {
    match state.store.fetch_statistics().await {
        Ok(statistics) => Json(statistics).into_response(),
        Err(err) => remote_failure(err),
    }
}
