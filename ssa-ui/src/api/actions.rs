//! Action triggers: every mutation of the store goes through here
//!
//! Handlers are thin translations between JSON and store operations; all
//! busy-flag and error-slot bookkeeping lives in the store itself.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use ssa_common::types::{AnalysisRequest, AnalysisWeights, SiteQuery};

use super::{remote_failure, ErrorResponse};
use crate::store::FilterUpdate;
use crate::AppState;

/// POST /ui/sites/refresh
///
/// Re-fetches the site list, optionally with score-range and pagination
/// parameters in the body.
pub async fn refresh_sites(
    State(state): State<AppState>,
    query: Option<Json<SiteQuery>>,
) -> Response {
    let query = query.map(|Json(q)| q).unwrap_or_default();

    match state.store.fetch_sites(&query).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => remote_failure(err),
    }
}

/// Selection change request; `site_id: null` clears the selection
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub site_id: Option<i64>,
}

/// POST /ui/sites/select
pub async fn select_site(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Response {
    let site = match request.site_id {
        Some(site_id) => {
            let site = state
                .store
                .sites()
                .into_iter()
                .find(|site| site.site_id == site_id);
            match site {
                Some(site) => Some(site),
                None => {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(ErrorResponse {
                            error: "not_found",
                            message: format!("Site with ID {} is not in the current view", site_id),
                        }),
                    )
                        .into_response()
                }
            }
        }
        None => None,
    };

    match state.store.select_site(site).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => remote_failure(err),
    }
}

/// PUT /ui/filters
pub async fn update_filters(
    State(state): State<AppState>,
    Json(update): Json<FilterUpdate>,
) -> StatusCode {
    state.store.update_filters(update);
    StatusCode::NO_CONTENT
}

/// DELETE /ui/filters
pub async fn reset_filters(State(state): State<AppState>) -> StatusCode {
    state.store.reset_filters();
    StatusCode::NO_CONTENT
}

/// PUT /ui/weights
pub async fn update_weights(
    State(state): State<AppState>,
    Json(weights): Json<AnalysisWeights>,
) -> StatusCode {
    state.store.update_weights(weights);
    StatusCode::NO_CONTENT
}

/// DELETE /ui/weights
pub async fn reset_weights(State(state): State<AppState>) -> StatusCode {
    state.store.reset_weights();
    StatusCode::NO_CONTENT
}

/// POST /ui/analyze
///
/// Body matches the scoring service's own analyze request shape.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match state
        .store
        .analyze_sites_with_weights(&request.weights)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => remote_failure(err),
    }
}
