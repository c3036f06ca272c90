//! Analysis result types.
//!
//! These types mirror the JSON schema of the analysis service's
//! `/api/v1/analyze` endpoint. Offsets in [`Span`] are UTF-8 byte
//! indices into the submitted text.

use serde::{Deserialize, Serialize};

/// A phrase in the source text flagged as suspicious by the analyzer.
///
/// Spans are created by the service and immutable once received. The
/// offsets and quoted text are analyzer claims, not trusted facts;
/// validation happens in [`crate::highlight::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Verbatim text of the flagged phrase
    pub text: String,

    /// Start byte offset in the source text (inclusive)
    #[serde(rename = "start_index")]
    pub start: usize,

    /// End byte offset in the source text (exclusive)
    #[serde(rename = "end_index")]
    pub end: usize,

    /// Why the phrase was flagged
    pub reason: String,

    /// Detection confidence in [0, 1]
    pub confidence: f64,
}

impl Span {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no text
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Reliability banding for a score.
///
/// The wire values are the service's (Portuguese) level strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReliabilityLevel {
    /// Score at or above the reliable threshold
    #[serde(rename = "confiável")]
    Reliable,
    /// Score between the caution and reliable thresholds
    #[serde(rename = "atenção")]
    Caution,
    /// Score below the caution threshold
    #[serde(rename = "duvidoso")]
    Doubtful,
}

impl ReliabilityLevel {
    /// Band a 0-100 score using the configured thresholds.
    ///
    /// Thresholds are product-tuned constants (defaults 70/50), carried
    /// in [`crate::config::AnalysisSettings`] rather than hardcoded here.
    pub fn from_score(score: u8, reliable_threshold: u8, caution_threshold: u8) -> Self {
        if score >= reliable_threshold {
            ReliabilityLevel::Reliable
        } else if score >= caution_threshold {
            ReliabilityLevel::Caution
        } else {
            ReliabilityLevel::Doubtful
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityLevel::Reliable => "reliable",
            ReliabilityLevel::Caution => "caution",
            ReliabilityLevel::Doubtful => "doubtful",
        }
    }
}

impl std::fmt::Display for ReliabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata block attached to an analysis response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Length of the analyzed text in bytes
    #[serde(default)]
    pub text_length: usize,
}

/// A completed reliability analysis.
///
/// Exactly one exists per settled request; a new submission replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Reliability score, 0 (doubtful) to 100 (reliable)
    #[serde(rename = "reliability_score")]
    pub score: u8,

    /// Banded reliability level as reported by the service
    #[serde(rename = "reliability_level")]
    pub level: ReliabilityLevel,

    /// Human-readable explanation of the result
    pub explanation: String,

    /// Suspicious phrases, possibly unordered and overlapping
    #[serde(rename = "suspicious_phrases", default)]
    pub spans: Vec<Span>,

    /// Overall confidence of the analysis in [0, 1]
    pub confidence: f64,

    /// Caveat about the limits of the analysis
    #[serde(rename = "uncertainty_warning", default)]
    pub warning: String,

    #[serde(default)]
    pub metadata: AnalysisMetadata,
}
