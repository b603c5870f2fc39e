//! Pipeline Integration Tests
//!
//! Controller outcomes, attempt bounds, degraded collaborators, timeouts,
//! cancellation and request validation, all against scripted providers.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use concept_forge::models::{ArtifactSource, GenerationRequest, Outcome};
use concept_forge::services::architecture::synthesize;
use concept_forge::services::generator::META_MARKER;
use concept_forge::AppError;
use concept_forge_quality_gates::{
    ArtifactKind, HeuristicValidator, ValidationContext, UNAVAILABLE_ISSUE,
};

use crate::support::*;

// ============================================================================
// Controller Outcomes
// ============================================================================

#[tokio::test]
async fn test_good_initial_attempt_is_accepted() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(true, 90)]),
    );
    let pipeline = pipeline_with(&provider, &test_config());

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Accepted);
    assert_eq!(result.artifact.source, ArtifactSource::Generated);
    assert_eq!(result.metadata.generator_calls, 1);
    assert_eq!(result.metadata.attempt_count, 1);
    assert!(!result.metadata.cache_hit);
    assert_eq!(provider.calls(Role::Judge), 1);
    assert_eq!(result.validation.confidence, 95);
    assert!(result.validation.verified);

    // Structural completion ran over the generated text
    assert!(result.content.starts_with("# FarmLink"));
    assert!(result.content.contains(META_MARKER));
    assert!(result.content.contains("## Next Steps"));
    assert_eq!(result.content, result.artifact.enhanced_content);
    assert_eq!(result.metadata.size_bytes, result.content.len());
}

#[tokio::test]
async fn test_correction_that_passes_is_corrected() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(STUB), Reply::text(good_document())])
            .judge(vec![verdict(false, 20), verdict(true, 90)]),
    );
    let pipeline = pipeline_with(&provider, &test_config());

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Corrected);
    assert_eq!(result.metadata.generator_calls, 2);
    assert!(provider.generation_prompts()[1].contains(STUB));
}

#[tokio::test]
async fn test_unverified_long_content_falls_back_without_enhancing() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(false, 30)]),
    );
    let pipeline = pipeline_with(&provider, &test_config());

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    // 65 < 70: one correction; content is long, so no enhancement
    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(result.metadata.generator_calls, 2);
    assert_eq!(result.validation.confidence, 65);
}

#[tokio::test]
async fn test_generator_calls_bounded_by_max_attempts() {
    for max_attempts in 0..=4u32 {
        let provider = Arc::new(
            ScriptedProvider::new()
                .extraction(vec![extraction_reply()])
                .generation(vec![Reply::text(STUB)])
                .judge(vec![verdict(false, 10)]),
        );
        let mut config = test_config();
        config.pipeline.max_attempts = max_attempts;
        let pipeline = pipeline_with(&provider, &config);

        let result = pipeline
            .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
            .await
            .unwrap();

        let calls = provider.calls(Role::Generation) as u32;
        assert!(calls <= 1 + max_attempts, "max_attempts={} calls={}", max_attempts, calls);
        // Correcting and enhancing each happen at most once
        assert!(calls <= 3);
        assert_eq!(calls, (1 + max_attempts).min(3));
        assert_eq!(result.outcome, Outcome::Fallback);
    }
}

// ============================================================================
// Degraded Collaborators
// ============================================================================

#[tokio::test]
async fn test_all_collaborators_down_still_returns_complete_artifact() {
    let provider = Arc::new(ScriptedProvider::new());
    let pipeline = pipeline_with(&provider, &test_config());

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(result.artifact.source, ArtifactSource::Template);
    // Judge placeholder 30, template heuristics 100
    assert_eq!(result.validation.confidence, 65);
    assert!(result.validation.issues.contains(&UNAVAILABLE_ISSUE.to_string()));
    assert_eq!(result.metadata.generator_calls, 2);

    let report = HeuristicValidator::default().validate(&result.content, &ValidationContext::default());
    assert!(report.issues.is_empty(), "{:?}", report.issues);
}

#[tokio::test]
async fn test_prototype_fallback_covers_every_planned_page() {
    let provider = Arc::new(ScriptedProvider::new().judge(vec![verdict(true, 90)]));
    let pipeline = pipeline_with(&provider, &test_config());

    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION).with_kind(ArtifactKind::Prototype);
    let result = pipeline.generate(&request).await.unwrap();

    assert_eq!(result.outcome, Outcome::Fallback);
    assert_eq!(result.metadata.kind, ArtifactKind::Prototype);
    assert!(result.content.starts_with("<!DOCTYPE html>"));
    assert!(result.content.contains(META_MARKER));

    let plan = synthesize(result.metadata.domain_category, &[]);
    let ctx = ValidationContext {
        kind: ArtifactKind::Prototype,
        expected_terms: plan.page_names(),
        ..ValidationContext::default()
    };
    let report = HeuristicValidator::default().validate(&result.content, &ctx);
    assert!(report.issues.is_empty(), "{:?}", report.issues);
}

#[tokio::test(start_paused = true)]
async fn test_generator_timeout_degrades_to_template() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::delayed(
                Duration::from_secs(30),
                Reply::text(good_document()),
            )])
            .judge(vec![verdict(true, 90)]),
    );
    let mut config = test_config();
    config.pipeline.call_timeout_secs = 1;
    let pipeline = pipeline_with(&provider, &config);

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    assert_eq!(result.artifact.source, ArtifactSource::Template);
    assert_eq!(result.outcome, Outcome::Fallback);
    // Template scored well, so no further attempts were made
    assert_eq!(result.metadata.generator_calls, 1);
}

#[tokio::test(start_paused = true)]
async fn test_judge_timeout_uses_placeholder_verdict() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![Reply::delayed(Duration::from_secs(30), verdict(true, 90))]),
    );
    let mut config = test_config();
    config.pipeline.call_timeout_secs = 1;
    let pipeline = pipeline_with(&provider, &config);

    let result = pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();

    assert_eq!(result.validation.confidence, 65);
    assert!(!result.validation.verified);
    assert_eq!(result.outcome, Outcome::Fallback);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancelled_before_start() {
    let provider = Arc::new(ScriptedProvider::new().extraction(vec![extraction_reply()]));
    let pipeline = pipeline_with(&provider, &test_config());

    let token = CancellationToken::new();
    token.cancel();
    let err = pipeline
        .generate_with_cancel(&GenerationRequest::new(MARKETPLACE_DESCRIPTION), token)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cancelled));
    assert!(!err.is_config());
    assert_eq!(pipeline.stats().snapshot().total_runs, 0);
    assert!(pipeline.cache().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_generation_leaves_shared_state_untouched() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::delayed(
                Duration::from_secs(3),
                Reply::text(good_document()),
            )])
            .judge(vec![verdict(true, 90)]),
    );
    let pipeline = pipeline_with(&provider, &test_config());
    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION);

    let token = CancellationToken::new();
    let canceller = {
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        }
    };
    let (result, _) = tokio::join!(pipeline.generate_with_cancel(&request, token), canceller);

    assert!(matches!(result, Err(AppError::Cancelled)));
    assert_eq!(provider.calls(Role::Generation), 1);
    assert_eq!(provider.calls(Role::Judge), 0);
    assert_eq!(pipeline.stats().snapshot(), Default::default());
    assert!(pipeline.cache().is_empty());
}

// ============================================================================
// Request Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_requests_are_rejected_without_calls() {
    let provider = Arc::new(ScriptedProvider::new());
    let pipeline = pipeline_with(&provider, &test_config());

    let empty = pipeline.generate(&GenerationRequest::new("   ")).await.unwrap_err();
    assert!(empty.is_config());

    let unknown_hint = GenerationRequest::new("a place to swap books").with_domain_hint("spaceships");
    let err = pipeline.generate(&unknown_hint).await.unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("spaceships"));

    assert_eq!(provider.total_calls(), 0);
}

#[tokio::test]
async fn test_domain_hint_overrides_classification() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(true, 90)]),
    );
    let pipeline = pipeline_with(&provider, &test_config());

    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION).with_domain_hint("saas");
    let result = pipeline.generate(&request).await.unwrap();

    assert_eq!(
        result.metadata.domain_category,
        concept_forge::models::DomainCategory::Saas
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_runs_share_stats() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(true, 90)]),
    );
    let pipeline = Arc::new(pipeline_with(&provider, &test_config()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let request = GenerationRequest::new(format!("{} number {}", MARKETPLACE_DESCRIPTION, i));
                pipeline.generate(&request).await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.outcome, Outcome::Accepted);
    }

    let snapshot = pipeline.stats().snapshot();
    assert_eq!(snapshot.total_runs, 4);
    assert_eq!(snapshot.outcomes.accepted, 4);
    assert_eq!(snapshot.confidence_histogram[9], 4);
    assert_eq!(pipeline.cache().len(), 4);
}
