//! Analysis, Synthesis and Validation Property Tests

use std::sync::Arc;
use std::time::Duration;

use concept_forge::models::{DomainCategory, FeatureSource, GenerationRequest};
use concept_forge::services::analyzer::default_features;
use concept_forge::services::architecture::synthesize;
use concept_forge::services::generator::{complete, StructureContext};
use concept_forge::services::RequirementsAnalyzer;
use concept_forge_quality_gates::{
    aggregate, ArtifactKind, QualityStatus, ValidationReport, ValidationSource,
    ValidationThresholds,
};

use crate::support::*;

fn analyzer(provider: &Arc<ScriptedProvider>) -> RequirementsAnalyzer {
    RequirementsAnalyzer::new(provider.clone(), 10, 512, Duration::from_secs(5))
}

// ============================================================================
// Requirements Analyzer
// ============================================================================

#[tokio::test]
async fn test_extraction_failure_uses_default_features() {
    let provider = Arc::new(ScriptedProvider::new().extraction(vec![Reply::text("I cannot help with that.")]));
    let analysis = analyzer(&provider)
        .analyze(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await;

    assert_eq!(analysis.feature_source, FeatureSource::Default);
    assert_eq!(analysis.features, default_features(DomainCategory::Marketplace, 10));
    assert_eq!(provider.calls(Role::Extraction), 1);
}

#[tokio::test]
async fn test_extraction_transport_error_uses_default_features() {
    let provider = Arc::new(ScriptedProvider::new());
    let analysis = analyzer(&provider)
        .analyze(&GenerationRequest::new("A to-do list app with reminders"))
        .await;

    assert_eq!(analysis.domain_category, DomainCategory::TaskManager);
    assert_eq!(analysis.feature_source, FeatureSource::Default);
    assert!(!analysis.features.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_extraction_timeout_uses_default_features() {
    let provider = Arc::new(ScriptedProvider::new().extraction(vec![Reply::delayed(
        Duration::from_secs(60),
        extraction_reply(),
    )]));
    let analysis = analyzer(&provider)
        .analyze(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await;

    assert_eq!(analysis.feature_source, FeatureSource::Default);
}

#[tokio::test]
async fn test_hint_overrides_keywords() {
    let provider = Arc::new(ScriptedProvider::new().extraction(vec![extraction_reply()]));
    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION).with_domain_hint("community");
    let analysis = analyzer(&provider).analyze(&request).await;

    assert_eq!(analysis.domain_category, DomainCategory::Community);
    assert!(analysis.hinted);
    assert_eq!(analysis.feature_source, FeatureSource::Extracted);
}

// ============================================================================
// Synthesis and Completion
// ============================================================================

#[test]
fn test_synthesis_is_deterministic() {
    for category in DomainCategory::ALL {
        let features = default_features(category, 10);
        assert_eq!(synthesize(category, &features), synthesize(category, &features));
    }
}

#[test]
fn test_completion_is_idempotent() {
    let ctx = StructureContext {
        title: "FarmLink".to_string(),
        category: DomainCategory::Marketplace,
    };
    let inputs = [
        ("", ArtifactKind::Document),
        (STUB, ArtifactKind::Document),
        ("```markdown\n## Problem\nLate deliveries\n```", ArtifactKind::Document),
        ("<div>Hello</div>", ArtifactKind::Prototype),
        ("<html><body><p>Hi</p></body></html>", ArtifactKind::Prototype),
        ("```html\n<header>Top</header>\n```", ArtifactKind::Prototype),
    ];
    for (raw, kind) in inputs {
        let once = complete(kind, raw, &ctx);
        let twice = complete(kind, &once, &ctx);
        assert_eq!(once, twice, "not idempotent for {:?}", raw);
    }
}

// ============================================================================
// Aggregation Boundaries
// ============================================================================

fn report(confidence: u8, verified: bool, issues: &[&str]) -> ValidationReport {
    ValidationReport::new(
        ValidationSource::Heuristic,
        verified,
        confidence,
        issues.iter().map(|s| s.to_string()).collect(),
        Vec::new(),
    )
}

#[test]
fn test_verified_boundary_at_sixty() {
    let thresholds = ValidationThresholds::default();
    assert!(!aggregate(&[report(59, true, &[])], &thresholds).verified);
    assert!(aggregate(&[report(60, true, &[])], &thresholds).verified);
}

#[test]
fn test_mixed_reports_average_and_dedupe() {
    let thresholds = ValidationThresholds::default();
    let aggregated = aggregate(
        &[report(80, true, &["thin copy"]), report(40, false, &["thin copy", "no pricing"])],
        &thresholds,
    );
    assert_eq!(aggregated.confidence, 60);
    assert!(!aggregated.verified);
    assert_eq!(aggregated.issues, vec!["thin copy", "no pricing"]);
    assert_eq!(aggregated.status, QualityStatus::Good);
}

#[test]
fn test_empty_report_list_is_critical() {
    let aggregated = aggregate(&[], &ValidationThresholds::default());
    assert_eq!(aggregated.confidence, 0);
    assert_eq!(aggregated.status, QualityStatus::Critical);
    assert!(!aggregated.verified);
}
