//! Wire types for the remote scoring service
//!
//! Field names match the service's JSON exactly. Scores are `None` until an
//! analysis has run for the site; sub-scores and the total score are
//! populated together by the same analysis event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate site with its current suitability score
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Site {
    /// Server-assigned site identity
    pub site_id: i64,
    /// Display name
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Administrative region the site falls in
    pub region: String,
    /// Land classification (e.g. barren, agricultural)
    pub land_type: String,
    /// Total suitability score in [0, 100]; `None` until analyzed
    pub total_suitability_score: Option<f64>,
    /// When the score was last computed
    pub analysis_timestamp: Option<DateTime<Utc>>,
}

/// Site with raw physical attributes and the per-criterion score breakdown
///
/// The wire format is a single flat object, not a nested `Site`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteDetail {
    pub site_id: i64,
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
    pub land_type: String,

    // Raw physical attributes
    pub area_sqm: i64,
    pub solar_irradiance_kwh: f64,
    pub grid_distance_km: f64,
    pub slope_degrees: f64,
    pub road_distance_km: f64,
    pub elevation_m: i64,

    // Per-criterion sub-scores, one per weight dimension
    pub solar_irradiance_score: Option<f64>,
    pub area_score: Option<f64>,
    pub grid_distance_score: Option<f64>,
    pub slope_score: Option<f64>,
    pub infrastructure_score: Option<f64>,

    pub total_suitability_score: Option<f64>,
    pub analysis_timestamp: Option<DateTime<Utc>>,
}

/// Paginated site list from `GET /api/sites`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteListResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub sites: Vec<Site>,
}

/// Optional query parameters for `GET /api/sites`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Scoring weights, one per criterion
///
/// Intended to sum to 1.0. The engine passes vectors through unvalidated;
/// range and sum checks are the scoring service's responsibility.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisWeights {
    pub solar: f64,
    pub area: f64,
    pub grid_distance: f64,
    pub slope: f64,
    pub infrastructure: f64,
}

impl Default for AnalysisWeights {
    /// Fixed default vector used at startup and on reset
    fn default() -> Self {
        Self {
            solar: 0.35,
            area: 0.25,
            grid_distance: 0.20,
            slope: 0.15,
            infrastructure: 0.05,
        }
    }
}

/// Request body for `POST /api/analyze`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub weights: AnalysisWeights,
}

/// Result of a server-side recalculation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub message: String,
    pub sites_analyzed: i64,
    pub weights_used: AnalysisWeights,
    pub timestamp: DateTime<Utc>,
}

/// Score range the map view restricts itself to
///
/// Bounds are expected to satisfy `min_score <= max_score` within [0, 100],
/// but the engine does not enforce either.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MapFilters {
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for MapFilters {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_score: 100.0,
        }
    }
}

/// One bucket of the score histogram
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreDistribution {
    pub range_label: String,
    pub count: i64,
    pub percentage: f64,
}

/// Per-region rollup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegionalStats {
    pub region: String,
    pub site_count: i64,
    pub avg_score: f64,
    pub max_score: f64,
    pub min_score: f64,
}

/// Per-land-type rollup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LandTypeStats {
    pub land_type: String,
    pub site_count: i64,
    pub avg_score: f64,
    pub max_score: f64,
}

/// Aggregate descriptive statistics from `GET /api/statistics`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatisticsResponse {
    pub total_sites: i64,
    pub sites_analyzed: i64,
    pub average_score: f64,
    pub median_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub std_deviation: f64,
    pub score_distribution: Vec<ScoreDistribution>,
    pub regional_stats: Vec<RegionalStats>,
    pub land_type_stats: Vec<LandTypeStats>,
    /// Top-N leaderboard by suitability score
    pub top_performing_sites: Vec<Site>,
}

/// Liveness probe response; extra server fields are ignored
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Payload format for the export passthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Query-parameter value the service expects
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
