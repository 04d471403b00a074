//! Async actions against the remote scoring service
//!
//! Each operation runs the same state machine: entering in-flight raises the
//! concern's busy flag and clears the shared error slot; the terminal
//! transition always lowers the flag again, success or failure, so a failed
//! request can never leave the store stuck busy. On failure the extracted
//! message lands in the shared error slot and the error is still returned to
//! the caller.
//!
//! Responses are applied in completion order. There is no cancellation: when
//! two calls to the same operation overlap, whichever resolves last
//! overwrites the state, even if it was issued first.

use ssa_common::error::{ClientError, ClientResult};
use ssa_common::types::{
    AnalysisResponse, AnalysisWeights, Site, SiteDetail, SiteListResponse, SiteQuery,
    StatisticsResponse,
};

use super::SiteStore;

/// Which busy flag an operation owns
#[derive(Debug, Clone, Copy)]
enum Busy {
    /// fetch-sites, fetch-detail, fetch-statistics
    Loading,
    /// run-analysis
    Analyzing,
}

impl SiteStore {
    /// Fetch the site list and replace `sites` wholesale on success
    pub async fn fetch_sites(&self, query: &SiteQuery) -> ClientResult<SiteListResponse> {
        self.begin(Busy::Loading);

        let result = self.client.list_sites(query).await;
        if let Ok(response) = &result {
            self.state.write().unwrap().sites = response.sites.clone();
            tracing::info!(
                total = response.total,
                fetched = response.sites.len(),
                "Replaced site list"
            );
        }

        self.finish(Busy::Loading, result.as_ref().err());
        result
    }

    /// Fetch one site's detail record and replace the stored detail on success
    ///
    /// On failure the previously stored detail is left untouched.
    pub async fn fetch_site_detail(&self, site_id: i64) -> ClientResult<SiteDetail> {
        self.begin(Busy::Loading);

        let result = self.client.get_site(site_id).await;
        if let Ok(detail) = &result {
            self.state.write().unwrap().selected_site_detail = Some(detail.clone());
        }

        self.finish(Busy::Loading, result.as_ref().err());
        result
    }

    /// Recompute all scores server-side with the given weights
    ///
    /// On remote success the weight vector is committed and the site list is
    /// re-fetched so scores reflect the new weights. A re-fetch failure still
    /// surfaces through the error slot and the returned `Result`, but the
    /// committed weights stay in place.
    pub async fn analyze_sites_with_weights(
        &self,
        weights: &AnalysisWeights,
    ) -> ClientResult<AnalysisResponse> {
        self.begin(Busy::Analyzing);

        let result = self.run_analysis_and_refresh(weights).await;

        self.finish(Busy::Analyzing, result.as_ref().err());
        result
    }

    async fn run_analysis_and_refresh(
        &self,
        weights: &AnalysisWeights,
    ) -> ClientResult<AnalysisResponse> {
        let response = self.client.run_analysis(weights).await?;
        self.state.write().unwrap().weights = weights.clone();

        self.fetch_sites(&SiteQuery::default()).await?;

        Ok(response)
    }

    /// Fetch aggregate statistics and replace the stored copy on success
    pub async fn fetch_statistics(&self) -> ClientResult<StatisticsResponse> {
        self.begin(Busy::Loading);

        let result = self.client.get_statistics().await;
        if let Ok(statistics) = &result {
            self.state.write().unwrap().statistics = Some(statistics.clone());
        }

        self.finish(Busy::Loading, result.as_ref().err());
        result
    }

    /// Change the current selection
    ///
    /// Selecting a site records it immediately and then fetches its detail;
    /// the selection is visible before the detail arrives. Passing `None`
    /// clears both the selection and its detail synchronously, with no
    /// network call.
    pub async fn select_site(&self, site: Option<Site>) -> ClientResult<()> {
        match site {
            Some(site) => {
                let site_id = site.site_id;
                self.state.write().unwrap().selected_site = Some(site);
                self.fetch_site_detail(site_id).await?;
                Ok(())
            }
            None => {
                let mut state = self.state.write().unwrap();
                state.selected_site = None;
                state.selected_site_detail = None;
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Busy-flag state machine
    // ------------------------------------------------------------------

    /// Enter in-flight: raise the concern's flag, clear the error slot
    fn begin(&self, busy: Busy) {
        let mut state = self.state.write().unwrap();
        match busy {
            Busy::Loading => state.loading = true,
            Busy::Analyzing => state.analyzing = true,
        }
        state.error = None;
    }

    /// Terminal transition: lower the flag, record any failure message
    ///
    /// The flag is lowered on both outcomes. The error slot is shared across
    /// operations and holds whichever failure happened most recently.
    fn finish(&self, busy: Busy, error: Option<&ClientError>) {
        let mut state = self.state.write().unwrap();
        match busy {
            Busy::Loading => state.loading = false,
            Busy::Analyzing => state.analyzing = false,
        }
        if let Some(err) = error {
            let message = err.message();
            tracing::warn!(error = %message, "Remote operation failed");
            state.error = Some(message);
        }
    }
}
