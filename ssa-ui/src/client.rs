//! Remote analysis client
//!
//! Typed wrapper around the scoring service's HTTP API. One request per
//! call: no retries, no backoff. All operations share a single 30 second
//! timeout, and every failure is normalized into [`ClientError`] carrying a
//! human-readable message.

use std::time::Duration;

use serde::de::DeserializeOwned;
use ssa_common::error::{ClientError, ClientResult};
use ssa_common::types::{
    AnalysisRequest, AnalysisResponse, AnalysisWeights, ExportFormat, HealthResponse, SiteDetail,
    SiteListResponse, SiteQuery, StatisticsResponse,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the remote scoring service
pub struct AnalysisClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client for the given base URL with the standard timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with an explicit timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List sites with optional score-range and pagination parameters
    pub async fn list_sites(&self, query: &SiteQuery) -> ClientResult<SiteListResponse> {
        let url = format!("{}/api/sites", self.base_url);
        tracing::debug!(url = %url, "Fetching site list");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        decode_response(response).await
    }

    /// Fetch the full detail record for one site
    ///
    /// Fails with [`ClientError::NotFound`] when the identity does not exist
    /// server-side.
    pub async fn get_site(&self, site_id: i64) -> ClientResult<SiteDetail> {
        let url = format!("{}/api/sites/{}", self.base_url, site_id);
        tracing::debug!(site_id, url = %url, "Fetching site detail");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        decode_response(response).await
    }

    /// Ask the service to recompute every site's scores with the given weights
    pub async fn run_analysis(&self, weights: &AnalysisWeights) -> ClientResult<AnalysisResponse> {
        let url = format!("{}/api/analyze", self.base_url);
        tracing::debug!(url = %url, "Requesting score recalculation");

        let request = AnalysisRequest {
            weights: weights.clone(),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let analysis: AnalysisResponse = decode_response(response).await?;

        tracing::info!(
            sites_analyzed = analysis.sites_analyzed,
            "Scoring service recalculated site scores"
        );

        Ok(analysis)
    }

    /// Fetch aggregate statistics over all analyzed sites
    pub async fn get_statistics(&self) -> ClientResult<StatisticsResponse> {
        let url = format!("{}/api/statistics", self.base_url);
        tracing::debug!(url = %url, "Fetching statistics");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        decode_response(response).await
    }

    /// Liveness probe against the scoring service
    pub async fn health_check(&self) -> ClientResult<HealthResponse> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        decode_response(response).await
    }

    /// Download the service's filtered site export as a raw payload
    pub async fn export_sites(
        &self,
        format: ExportFormat,
        min_score: Option<f64>,
    ) -> ClientResult<String> {
        let url = format!("{}/api/export", self.base_url);
        tracing::debug!(url = %url, format = format.as_str(), "Exporting sites");

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("format", format.as_str())]);
        if let Some(min_score) = min_score {
            request = request.query(&[("min_score", min_score)]);
        }

        let response = request.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;

        response.text().await.map_err(transport_error)
    }
}

/// Map a reqwest failure to the transport variant
fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Transport("Request timed out".to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Reject non-2xx responses, extracting the best available message
async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(status, &body);

    if status == reqwest::StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Server(status.as_u16(), message))
    }
}

/// Decode a JSON response body after status triage
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let response = check_status(response).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::Transport(format!("Invalid response body: {}", e)))
}

/// Best-effort message extraction from an error response body
///
/// The service reports structured errors as `{"detail": "..."}`. Fall back to
/// the raw body text, then to the bare HTTP status.
fn extract_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}
