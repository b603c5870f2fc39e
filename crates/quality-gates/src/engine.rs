//! Validation Engine
//!
//! Fans an artifact out to the semantic and heuristic validators, joins both
//! verdicts, and folds them into one `AggregatedValidation`.
//!
//! Both validators run concurrently via `tokio::join!`; aggregation only
//! happens once every validator has produced a report.

use std::collections::HashSet;

use tracing::info;

use crate::heuristic::HeuristicValidator;
use crate::models::{
    AggregatedValidation, QualityStatus, ValidationContext, ValidationReport, ValidationThresholds,
};
use crate::semantic::SemanticValidator;

/// Reports from every validator plus their aggregate.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub reports: Vec<ValidationReport>,
    pub aggregated: AggregatedValidation,
}

/// Runs the configured validators and aggregates their reports.
pub struct ValidationEngine {
    semantic: Option<SemanticValidator>,
    heuristic: HeuristicValidator,
    thresholds: ValidationThresholds,
}

impl ValidationEngine {
    /// Create a heuristic-only engine.
    pub fn new(heuristic: HeuristicValidator, thresholds: ValidationThresholds) -> Self {
        Self {
            semantic: None,
            heuristic: heuristic.with_verify_min(thresholds.verify_min),
            thresholds,
        }
    }

    /// Attach a semantic validator via builder pattern.
    pub fn with_semantic(mut self, semantic: SemanticValidator) -> Self {
        self.semantic = Some(semantic);
        self
    }

    pub fn has_semantic(&self) -> bool {
        self.semantic.is_some()
    }

    pub fn thresholds(&self) -> &ValidationThresholds {
        &self.thresholds
    }

    /// Validate an artifact with every configured validator.
    pub async fn validate(&self, content: &str, ctx: &ValidationContext) -> ValidationOutcome {
        let semantic = async {
            match &self.semantic {
                Some(validator) => Some(validator.validate(content, ctx).await),
                None => None,
            }
        };
        let heuristic = async { self.heuristic.validate(content, ctx) };

        let (semantic_report, heuristic_report) = tokio::join!(semantic, heuristic);

        let mut reports = Vec::with_capacity(2);
        reports.extend(semantic_report);
        reports.push(heuristic_report);

        let aggregated = aggregate(&reports, &self.thresholds);
        info!(
            confidence = aggregated.confidence,
            status = %aggregated.status,
            verified = aggregated.verified,
            validators = reports.len(),
            "validation aggregated"
        );

        ValidationOutcome { reports, aggregated }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Fold validator reports into one verdict.
///
/// Confidence is the rounded mean; `verified` requires every report to be
/// verified and the mean to reach `verify_min`. Issues and recommendations
/// are de-duplicated keeping first-seen order.
pub fn aggregate(
    reports: &[ValidationReport],
    thresholds: &ValidationThresholds,
) -> AggregatedValidation {
    if reports.is_empty() {
        return AggregatedValidation {
            confidence: 0,
            status: QualityStatus::Critical,
            verified: false,
            issues: Vec::new(),
            recommendations: Vec::new(),
        };
    }

    let total: u32 = reports.iter().map(|r| u32::from(r.confidence)).sum();
    let mean = f64::from(total) / reports.len() as f64;
    let confidence = mean.round().clamp(0.0, 100.0) as u8;

    let verified = reports.iter().all(|r| r.verified) && confidence >= thresholds.verify_min;
    let issues = dedupe(reports.iter().flat_map(|r| r.issues.iter()));
    let recommendations = dedupe(reports.iter().flat_map(|r| r.recommendations.iter()));
    let status = classify_status(confidence, issues.len(), thresholds);

    AggregatedValidation {
        confidence,
        status,
        verified,
        issues,
        recommendations,
    }
}

/// Classify an aggregated confidence and issue count.
pub fn classify_status(
    confidence: u8,
    issue_count: usize,
    thresholds: &ValidationThresholds,
) -> QualityStatus {
    if confidence >= thresholds.excellent_min && issue_count == 0 {
        QualityStatus::Excellent
    } else if confidence >= thresholds.good_min && issue_count <= thresholds.good_max_issues {
        QualityStatus::Good
    } else if confidence >= thresholds.warning_min {
        QualityStatus::Warning
    } else {
        QualityStatus::Critical
    }
}

fn dedupe<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}
