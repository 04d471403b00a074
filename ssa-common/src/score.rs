//! Score band classification
//!
//! Maps a nullable suitability score to one of five discrete bands (plus a
//! neutral "not analyzed" band) used for marker color and label presentation.
//! Color and label always come from the same classification, so their
//! thresholds cannot drift apart.

use serde::{Deserialize, Serialize};

/// Discrete classification of a suitability score
///
/// Bucket boundaries use inclusive lower bounds: 80, 60, 40, 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// score >= 80
    Excellent,
    /// score >= 60
    Good,
    /// score >= 40
    Moderate,
    /// score >= 20
    Poor,
    /// score < 20
    VeryPoor,
    /// No analysis has run for the site yet
    NotAnalyzed,
}

impl ScoreBand {
    /// Every band, highest first
    pub const ALL: [ScoreBand; 6] = [
        ScoreBand::Excellent,
        ScoreBand::Good,
        ScoreBand::Moderate,
        ScoreBand::Poor,
        ScoreBand::VeryPoor,
        ScoreBand::NotAnalyzed,
    ];

    /// Classify a nullable score into its band
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            None => ScoreBand::NotAnalyzed,
            Some(s) if s >= 80.0 => ScoreBand::Excellent,
            Some(s) if s >= 60.0 => ScoreBand::Good,
            Some(s) if s >= 40.0 => ScoreBand::Moderate,
            Some(s) if s >= 20.0 => ScoreBand::Poor,
            Some(_) => ScoreBand::VeryPoor,
        }
    }

    /// Marker color for this band
    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "#10b981",
            ScoreBand::Good => "#84cc16",
            ScoreBand::Moderate => "#f59e0b",
            ScoreBand::Poor => "#f97316",
            ScoreBand::VeryPoor => "#ef4444",
            ScoreBand::NotAnalyzed => "#9ca3af",
        }
    }

    /// Human-readable label for this band
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Poor => "Poor",
            ScoreBand::VeryPoor => "Very Poor",
            ScoreBand::NotAnalyzed => "Not Analyzed",
        }
    }
}

/// Marker color for a nullable score
pub fn score_color(score: Option<f64>) -> &'static str {
    ScoreBand::classify(score).color()
}

/// Presentation label for a nullable score
pub fn score_label(score: Option<f64>) -> &'static str {
    ScoreBand::classify(score).label()
}
