//! Cache and Statistics Integration Tests

use std::sync::Arc;

use concept_forge::models::{GenerationRequest, Outcome};
use concept_forge::services::{QualityStats, ResultCache};

use crate::support::*;

fn accepting_provider() -> Arc<ScriptedProvider> {
    Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(true, 90)]),
    )
}

#[tokio::test]
async fn test_cache_hit_makes_no_collaborator_calls() {
    let provider = accepting_provider();
    let pipeline = pipeline_with(&provider, &test_config());
    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION);

    let first = pipeline.generate(&request).await.unwrap();
    let calls_after_first = provider.total_calls();

    let second = pipeline.generate(&request).await.unwrap();
    assert_eq!(provider.total_calls(), calls_after_first);
    assert!(second.metadata.cache_hit);

    // Identical apart from the cache flag
    let mut expected = first.clone();
    expected.metadata.cache_hit = true;
    assert_eq!(second, expected);

    let snapshot = pipeline.stats().snapshot();
    assert_eq!(snapshot.total_runs, 1);
    assert_eq!(snapshot.cache_hits, 1);
}

#[tokio::test]
async fn test_normalized_descriptions_share_cache_entry() {
    let provider = accepting_provider();
    let pipeline = pipeline_with(&provider, &test_config());

    pipeline
        .generate(&GenerationRequest::new(MARKETPLACE_DESCRIPTION))
        .await
        .unwrap();
    let calls = provider.total_calls();

    let shouty = format!("  {}  ", MARKETPLACE_DESCRIPTION.to_uppercase());
    let result = pipeline.generate(&GenerationRequest::new(shouty)).await.unwrap();
    assert!(result.metadata.cache_hit);
    assert_eq!(provider.total_calls(), calls);
}

#[tokio::test]
async fn test_zero_capacity_disables_caching() {
    let provider = accepting_provider();
    let mut config = test_config();
    config.pipeline.cache_capacity = 0;
    let pipeline = pipeline_with(&provider, &config);
    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION);

    pipeline.generate(&request).await.unwrap();
    let second = pipeline.generate(&request).await.unwrap();

    assert!(!second.metadata.cache_hit);
    assert_eq!(provider.calls(Role::Generation), 2);
    assert_eq!(pipeline.stats().snapshot().total_runs, 2);
}

#[tokio::test]
async fn test_shared_state_across_pipelines() {
    let cache = Arc::new(ResultCache::new(8));
    let stats = Arc::new(QualityStats::new());
    let request = GenerationRequest::new(MARKETPLACE_DESCRIPTION);

    let first_provider = accepting_provider();
    let first = pipeline_with(&first_provider, &test_config())
        .with_shared_state(Arc::clone(&cache), Arc::clone(&stats));
    first.generate(&request).await.unwrap();

    let second_provider = accepting_provider();
    let second = pipeline_with(&second_provider, &test_config())
        .with_shared_state(Arc::clone(&cache), Arc::clone(&stats));
    let result = second.generate(&request).await.unwrap();

    assert!(result.metadata.cache_hit);
    assert_eq!(second_provider.total_calls(), 0);
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.total_runs, 1);
    assert_eq!(snapshot.outcomes.get(Outcome::Accepted), 1);
    assert_eq!(snapshot.cache_hits, 1);
}

#[tokio::test]
async fn test_stats_track_outcomes_and_sizes() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .extraction(vec![extraction_reply()])
            .generation(vec![Reply::text(good_document())])
            .judge(vec![verdict(true, 90)]),
    );
    let failing = Arc::new(ScriptedProvider::new());
    let stats = Arc::new(QualityStats::new());
    let cache = Arc::new(ResultCache::new(8));

    let good = pipeline_with(&provider, &test_config()).with_shared_state(cache.clone(), stats.clone());
    let bad = pipeline_with(&failing, &test_config()).with_shared_state(cache.clone(), stats.clone());

    let accepted = good
        .generate(&GenerationRequest::new("A SaaS dashboard for bakery inventory"))
        .await
        .unwrap();
    let fallback = bad
        .generate(&GenerationRequest::new("A community forum for birdwatchers"))
        .await
        .unwrap();
    assert_eq!(fallback.outcome, Outcome::Fallback);

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.total_runs, 2);
    assert_eq!(snapshot.outcomes.accepted, 1);
    assert_eq!(snapshot.outcomes.fallback, 1);
    assert_eq!(
        snapshot.total_size_bytes,
        (accepted.metadata.size_bytes + fallback.metadata.size_bytes) as u64
    );
    assert_eq!(snapshot.confidence_histogram.iter().sum::<u64>(), 2);
    assert_eq!(snapshot.average_confidence, 80.0);
}
