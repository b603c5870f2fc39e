//! Validation Models
//!
//! Data structures shared by the semantic validator, the heuristic validator,
//! and the aggregation step.

use serde::{Deserialize, Serialize};

/// The two artifact families the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Structured Markdown business document
    #[default]
    Document,
    /// Single-page runnable HTML prototype
    Prototype,
}

impl ArtifactKind {
    /// Get human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::Document => "document",
            ArtifactKind::Prototype => "prototype",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How hard the heuristic validator penalizes failed rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Lenient,
    #[default]
    Standard,
    Strict,
}

impl Strictness {
    /// Scale a rule penalty: lenient halves it, strict adds half again.
    pub fn scale(&self, penalty: u8) -> u8 {
        let scaled = match self {
            Strictness::Lenient => f64::from(penalty) * 0.5,
            Strictness::Standard => f64::from(penalty),
            Strictness::Strict => f64::from(penalty) * 1.5,
        };
        scaled.round().min(100.0) as u8
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "lenient"),
            Strictness::Standard => write!(f, "standard"),
            Strictness::Strict => write!(f, "strict"),
        }
    }
}

/// Which validator produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSource {
    /// Judgment delegated to an external collaborator
    Semantic,
    /// Deterministic rule checks
    Heuristic,
}

impl std::fmt::Display for ValidationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationSource::Semantic => write!(f, "semantic"),
            ValidationSource::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// One validator's verdict on one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub source: ValidationSource,
    pub verified: bool,
    /// 0..=100
    pub confidence: u8,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Confidence assigned when the semantic judge cannot be consulted.
pub const UNAVAILABLE_CONFIDENCE: u8 = 30;

/// Issue recorded when the semantic judge cannot be consulted.
pub const UNAVAILABLE_ISSUE: &str = "validation unavailable";

impl ValidationReport {
    /// Create a report, clamping confidence into 0..=100.
    pub fn new(
        source: ValidationSource,
        verified: bool,
        confidence: u8,
        issues: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            source,
            verified,
            confidence: confidence.min(100),
            issues,
            recommendations,
        }
    }

    /// Conservative placeholder used when a validator cannot produce a verdict.
    pub fn unavailable(source: ValidationSource) -> Self {
        Self::new(
            source,
            false,
            UNAVAILABLE_CONFIDENCE,
            vec![UNAVAILABLE_ISSUE.to_string()],
            Vec::new(),
        )
    }
}

/// Overall quality classification of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl std::fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityStatus::Excellent => write!(f, "excellent"),
            QualityStatus::Good => write!(f, "good"),
            QualityStatus::Warning => write!(f, "warning"),
            QualityStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Combined verdict of every validator that ran on one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedValidation {
    pub confidence: u8,
    pub status: QualityStatus,
    pub verified: bool,
    /// De-duplicated, first-seen order
    pub issues: Vec<String>,
    /// De-duplicated, first-seen order
    pub recommendations: Vec<String>,
}

/// Thresholds used by aggregation and status classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationThresholds {
    /// Minimum confidence for `excellent` (also requires zero issues)
    #[serde(default = "default_excellent_min")]
    pub excellent_min: u8,
    /// Minimum confidence for `good`
    #[serde(default = "default_good_min")]
    pub good_min: u8,
    /// Maximum issue count still classified as `good`
    #[serde(default = "default_good_max_issues")]
    pub good_max_issues: usize,
    /// Minimum confidence for `warning`; below is `critical`
    #[serde(default = "default_warning_min")]
    pub warning_min: u8,
    /// Minimum aggregated confidence for `verified`
    #[serde(default = "default_verify_min")]
    pub verify_min: u8,
}

fn default_excellent_min() -> u8 {
    80
}

fn default_good_min() -> u8 {
    60
}

fn default_good_max_issues() -> usize {
    2
}

fn default_warning_min() -> u8 {
    40
}

fn default_verify_min() -> u8 {
    60
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            excellent_min: default_excellent_min(),
            good_min: default_good_min(),
            good_max_issues: default_good_max_issues(),
            warning_min: default_warning_min(),
            verify_min: default_verify_min(),
        }
    }
}

impl ValidationThresholds {
    /// Check that the thresholds are ordered and within 0..=100.
    pub fn validate(&self) -> Result<(), String> {
        if self.excellent_min > 100 || self.verify_min > 100 {
            return Err("thresholds must be within 0..=100".to_string());
        }
        if !(self.excellent_min >= self.good_min && self.good_min >= self.warning_min) {
            return Err(format!(
                "thresholds must be ordered excellent ({}) >= good ({}) >= warning ({})",
                self.excellent_min, self.good_min, self.warning_min
            ));
        }
        Ok(())
    }
}

/// Context handed to validators alongside the artifact text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    /// Declared artifact type; selects the heuristic rule set
    pub kind: ArtifactKind,
    /// Short description of what was requested
    pub description: String,
    /// Domain category or hint, if known
    pub domain_hint: Option<String>,
    /// Names the artifact is expected to mention (pages, features)
    pub expected_terms: Vec<String>,
    /// Penalty scaling for heuristic rules
    pub strictness: Strictness,
}
