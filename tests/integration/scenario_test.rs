//! End-to-end Scenario Tests
//!
//! The farm-to-restaurant marketplace walkthrough: classification, plan
//! contents, the full correction/enhancement cycle, and template fallback.

use std::sync::Arc;

use concept_forge::models::{ArtifactSource, DomainCategory, GenerationRequest, Outcome};
use concept_forge::services::architecture::synthesize;
use concept_forge::services::RequirementsAnalyzer;
use concept_forge_quality_gates::{HeuristicValidator, ValidationContext};

use crate::support::*;

#[tokio::test]
async fn test_marketplace_analysis_and_plan() {
    let provider = Arc::new(ScriptedProvider::new().extraction(vec![extraction_reply()]));
    let analyzer = RequirementsAnalyzer::new(provider.clone(), 10, 512, std::time::Duration::from_secs(5));

    let analysis = analyzer
        .analyze(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await;
    assert_eq!(analysis.domain_category, DomainCategory::Marketplace);
    assert!(!analysis.hinted);
    assert_eq!(analysis.features.len(), 4);

    let plan = synthesize(analysis.domain_category, &analysis.features);
    assert!(plan.page_names().contains(&"Listings".to_string()));
    assert!(plan.components.iter().any(|c| c.name == "Ordering Panel"));
    assert!(plan
        .technologies
        .integrations
        .iter()
        .any(|t| t.contains("Stripe")));
}

#[tokio::test]
async fn test_marketplace_stub_runs_full_cycle_then_falls_back() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(STUB)])
            .judge(vec![verdict(false, 20)]),
    );
    let config = test_config();
    let pipeline = pipeline_with(&provider, &config);

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    // initial, correction, enhancement: 1 + max_attempts generator calls
    assert_eq!(provider.calls(Role::Generation), 3);
    assert_eq!(result.metadata.generator_calls, 3);
    assert_eq!(result.metadata.attempt_count, 3);
    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(result.artifact.source, ArtifactSource::Template);
    assert_eq!(result.metadata.domain_category, DomainCategory::Marketplace);

    // Last computed verdict is attached, not a re-validation of the template
    assert!(result.validation.confidence < 70);
    assert!(!result.validation.verified);

    // Correction prompt carried the issues, enhancement asked for depth
    let prompts = provider.generation_prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[1].contains("Fix these problems"));
    assert!(prompts[1].contains("Missing required section"));
    assert!(prompts[2].contains("Add more depth"));

    // The fallback document is complete on its own
    let report = HeuristicValidator::default().validate(&result.content, &ValidationContext::default());
    assert!(report.issues.is_empty(), "{:?}", report.issues);
    assert!(result.content.contains("Listings"));
    assert!(result.content.contains("## Next Steps"));
}

#[tokio::test]
async fn test_marketplace_attempt_kinds_recorded_in_order() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(STUB), Reply::text(STUB), Reply::text(good_document())])
            .judge(vec![verdict(false, 20), verdict(false, 20), verdict(true, 90)]),
    );
    let config = test_config();
    let pipeline = pipeline_with(&provider, &config);

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    // The third (enhancement) attempt passed the gate
    assert_eq!(result.outcome, Outcome::Enhanced);
    assert_eq!(result.artifact.source, ArtifactSource::Generated);
    assert!(result.validation.verified);
    assert_eq!(result.metadata.attempt_count, 3);
}
