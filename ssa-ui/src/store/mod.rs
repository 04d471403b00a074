//! Site collection state
//!
//! `SiteStore` is the authoritative in-memory view of sites and their
//! scores: the fetched site list, the current selection and its detail,
//! aggregate statistics, the scoring-weight vector, and the map filters.
//! Filtered/sorted views are recomputed from current state on every read and
//! never cached, so they cannot drift from `sites` + `filters`.
//!
//! The store is constructed once at app start and handed around as an
//! `Arc<SiteStore>`. State lives behind a single `RwLock` that is only held
//! for synchronous sections, never across an await; suspension points are
//! exactly the remote client's calls. The async operations live in
//! `actions.rs`.

mod actions;
#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::sync::RwLock;

use ssa_common::types::{
    AnalysisWeights, MapFilters, Site, SiteDetail, StatisticsResponse,
};

use crate::client::AnalysisClient;

/// Partial filter update; unset fields keep their current value
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct FilterUpdate {
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

/// Everything the store owns, behind one lock
#[derive(Debug, Default)]
struct StoreState {
    sites: Vec<Site>,
    selected_site: Option<Site>,
    selected_site_detail: Option<SiteDetail>,
    statistics: Option<StatisticsResponse>,
    weights: AnalysisWeights,
    filters: MapFilters,
    loading: bool,
    analyzing: bool,
    error: Option<String>,
}

/// Client-side analysis state engine
pub struct SiteStore {
    client: AnalysisClient,
    state: RwLock<StoreState>,
}

impl SiteStore {
    /// Create a store backed by the given remote client
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            client,
            state: RwLock::new(StoreState::default()),
        }
    }

    // ------------------------------------------------------------------
    // State reads
    // ------------------------------------------------------------------

    /// All fetched sites, unfiltered
    pub fn sites(&self) -> Vec<Site> {
        self.state.read().unwrap().sites.clone()
    }

    /// Currently selected site, if any
    pub fn selected_site(&self) -> Option<Site> {
        self.state.read().unwrap().selected_site.clone()
    }

    /// Detail record for the current selection, if fetched
    pub fn selected_site_detail(&self) -> Option<SiteDetail> {
        self.state.read().unwrap().selected_site_detail.clone()
    }

    /// Most recently fetched aggregate statistics
    pub fn statistics(&self) -> Option<StatisticsResponse> {
        self.state.read().unwrap().statistics.clone()
    }

    /// Current scoring-weight vector
    pub fn weights(&self) -> AnalysisWeights {
        self.state.read().unwrap().weights.clone()
    }

    /// Current map filters
    pub fn filters(&self) -> MapFilters {
        self.state.read().unwrap().filters
    }

    /// True while a fetch/detail/statistics request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// True while an analysis request is in flight
    pub fn is_analyzing(&self) -> bool {
        self.state.read().unwrap().analyzing
    }

    /// Message from the most recent failure, across all operations
    pub fn last_error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Sites whose score falls within the filter range, bounds inclusive
    ///
    /// A site with no score is never included, regardless of bounds.
    pub fn filtered_sites(&self) -> Vec<Site> {
        let state = self.state.read().unwrap();
        state
            .sites
            .iter()
            .filter(|site| match site.total_suitability_score {
                Some(score) => {
                    score >= state.filters.min_score && score <= state.filters.max_score
                }
                None => false,
            })
            .cloned()
            .collect()
    }

    /// Filtered sites ordered by score, highest first
    ///
    /// The sort is stable, so equal scores keep their order from
    /// [`filtered_sites`](Self::filtered_sites). A missing score compares as
    /// 0; `filtered_sites` never passes one through, so that branch is a
    /// fallback only.
    pub fn sorted_sites(&self) -> Vec<Site> {
        let mut sites = self.filtered_sites();
        sites.sort_by(|a, b| {
            let score_a = a.total_suitability_score.unwrap_or(0.0);
            let score_b = b.total_suitability_score.unwrap_or(0.0);
            score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
        });
        sites
    }

    /// Count of all fetched sites, ignoring filters
    pub fn total_sites(&self) -> usize {
        self.state.read().unwrap().sites.len()
    }

    /// Count of sites that have a score
    pub fn analyzed_sites(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .sites
            .iter()
            .filter(|site| site.total_suitability_score.is_some())
            .count()
    }

    // ------------------------------------------------------------------
    // Synchronous mutations
    // ------------------------------------------------------------------

    /// Replace the weight vector unconditionally
    ///
    /// No range or sum validation happens here; vectors are passed through to
    /// the scoring service as-is.
    pub fn update_weights(&self, weights: AnalysisWeights) {
        self.state.write().unwrap().weights = weights;
    }

    /// Restore the default weight vector verbatim
    pub fn reset_weights(&self) {
        self.state.write().unwrap().weights = AnalysisWeights::default();
    }

    /// Merge a partial filter update into the current filters
    pub fn update_filters(&self, update: FilterUpdate) {
        let mut state = self.state.write().unwrap();
        if let Some(min_score) = update.min_score {
            state.filters.min_score = min_score;
        }
        if let Some(max_score) = update.max_score {
            state.filters.max_score = max_score;
        }
    }

    /// Restore the default filter range
    pub fn reset_filters(&self) {
        self.state.write().unwrap().filters = MapFilters::default();
    }

    /// Clear the shared error slot
    pub fn clear_error(&self) {
        self.state.write().unwrap().error = None;
    }
}
