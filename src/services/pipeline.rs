//! Generation Pipeline
//!
//! Orchestrates one run end to end:
//!
//! request -> cache lookup -> requirements analysis -> architecture synthesis
//! -> (generate -> validate -> decide)* -> result -> cache + stats
//!
//! The pipeline is `Send + Sync` and meant to be shared behind an `Arc`;
//! every `generate` call is independent. The result cache and the quality
//! statistics are the only shared state and are written once, at the
//! terminal outcome. Cancelled runs leave both untouched.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use concept_forge_llm::{create_provider, LlmProvider};
use concept_forge_quality_gates::{ArtifactKind, ValidationContext, ValidationEngine};

use crate::models::{
    Attempt, AttemptKind, ContentArtifact, GenerationRequest, GenerationResult, Outcome,
    PipelineRun,
};
use crate::storage::ForgeConfig;
use crate::utils::error::{AppError, AppResult};

use super::analyzer::RequirementsAnalyzer;
use super::architecture::synthesize;
use super::cache::{fingerprint, ResultCache};
use super::controller::{decide, ControllerPolicy, ControllerState, Decision, DecisionInput};
use super::generator::{ContentGenerator, GenerationDirective};
use super::stats::QualityStats;
use super::validation::build_engine;

/// Quality-gated generation pipeline.
pub struct GenerationPipeline {
    analyzer: RequirementsAnalyzer,
    generator: ContentGenerator,
    engine: ValidationEngine,
    policy: ControllerPolicy,
    cache: Arc<ResultCache>,
    stats: Arc<QualityStats>,
}

impl GenerationPipeline {
    /// Create a pipeline over one generative provider and a ready engine.
    pub fn new(provider: Arc<dyn LlmProvider>, engine: ValidationEngine, config: &ForgeConfig) -> Self {
        let pipeline = &config.pipeline;
        let timeout = Duration::from_secs(pipeline.call_timeout_secs);
        Self {
            analyzer: RequirementsAnalyzer::new(
                Arc::clone(&provider),
                pipeline.max_features,
                pipeline.extraction_max_tokens,
                timeout,
            ),
            generator: ContentGenerator::new(provider, pipeline.max_prompt_chars, timeout),
            engine,
            policy: ControllerPolicy::from_config(pipeline),
            cache: Arc::new(ResultCache::new(pipeline.cache_capacity)),
            stats: Arc::new(QualityStats::new()),
        }
    }

    /// Build providers and the validation engine from configuration.
    pub fn from_config(config: &ForgeConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;

        let provider = create_provider(config.provider.clone())
            .map_err(|e| AppError::config(format!("provider: {}", e)))?;
        let judge = match &config.judge {
            Some(judge) => create_provider(judge.clone())
                .map_err(|e| AppError::config(format!("judge: {}", e)))?,
            None => Arc::clone(&provider),
        };

        let engine = build_engine(config, judge);
        Ok(Self::new(provider, engine, config))
    }

    /// Share a cache and statistics with other pipelines via builder pattern.
    pub fn with_shared_state(mut self, cache: Arc<ResultCache>, stats: Arc<QualityStats>) -> Self {
        self.cache = cache;
        self.stats = stats;
        self
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn stats(&self) -> &Arc<QualityStats> {
        &self.stats
    }

    pub fn policy(&self) -> &ControllerPolicy {
        &self.policy
    }

    /// Run the pipeline for one request.
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResult> {
        self.generate_with_cancel(request, CancellationToken::new()).await
    }

    /// Run the pipeline, aborting with `AppError::Cancelled` when `token` fires.
    pub async fn generate_with_cancel(
        &self,
        request: &GenerationRequest,
        token: CancellationToken,
    ) -> AppResult<GenerationResult> {
        request.validate()?;

        let cache_key = fingerprint(request);
        if let Some(mut cached) = self.cache.get(&cache_key) {
            info!(run_id = %cached.run_id, "cache hit");
            cached.metadata.cache_hit = true;
            self.stats.record_cache_hit();
            return Ok(cached);
        }

        let started = Instant::now();

        // ====================================================================
        // Analysis and planning
        // ====================================================================

        let analysis = cancellable(&token, self.analyzer.analyze(request)).await?;
        let plan = synthesize(analysis.domain_category, &analysis.features);
        debug!(
            pages = plan.pages.len(),
            components = plan.components.len(),
            "architecture synthesized"
        );

        let mut run = PipelineRun::new(request.clone(), analysis, plan, cache_key);
        let ctx = validation_context(&run);
        info!(run_id = %run.id, category = %run.plan.domain_category, kind = %ctx.kind, "run started");

        // ====================================================================
        // Generate / validate / decide
        // ====================================================================

        let mut directive = GenerationDirective::Initial;
        let mut attempt_kind = AttemptKind::Initial;
        let mut generator_calls: u32 = 0;
        let mut corrections_used: u32 = 0;
        let mut enhancements_used: u32 = 0;

        let (artifact, outcome, validation) = loop {
            let artifact = cancellable(
                &token,
                self.generator.generate(
                    &run.request,
                    &run.plan,
                    &run.analysis.features,
                    &directive,
                ),
            )
            .await?;
            generator_calls += 1;
            trace_state(&run, ControllerState::Generated);

            let validated = cancellable(&token, self.engine.validate(&artifact.enhanced_content, &ctx)).await?;
            trace_state(&run, ControllerState::Validated);

            let decision = decide(
                &DecisionInput {
                    aggregated: &validated.aggregated,
                    generated: !artifact.is_template(),
                    content_chars: artifact.raw_chars(),
                    attempts_used: corrections_used + enhancements_used,
                    corrections_used,
                    enhancements_used,
                },
                &self.policy,
            );

            let aggregated = validated.aggregated.clone();
            let previous = artifact.raw_content.clone();
            run.push_attempt(Attempt {
                kind: attempt_kind,
                artifact: artifact.clone(),
                reports: validated.reports,
                aggregated: validated.aggregated,
            });
            trace_state(&run, decision.next_state());

            match decision {
                Decision::Accept => {
                    break (artifact, Outcome::for_accepted(attempt_kind), aggregated);
                }
                Decision::Correct => {
                    corrections_used += 1;
                    attempt_kind = AttemptKind::Correction;
                    directive = GenerationDirective::Correct {
                        previous,
                        issues: aggregated.issues,
                    };
                }
                Decision::Enhance => {
                    enhancements_used += 1;
                    attempt_kind = AttemptKind::Enhancement;
                    directive = GenerationDirective::Enhance { previous };
                }
                Decision::Fallback => {
                    break (self.fallback_artifact(&run), Outcome::Fallback, aggregated);
                }
            }
        };

        // ====================================================================
        // Terminal outcome
        // ====================================================================

        let duration_ms = started.elapsed().as_millis() as u64;
        let result = run.complete(artifact, outcome, validation, generator_calls, duration_ms);

        self.cache.insert(run.cache_key.clone(), result.clone());
        self.stats
            .record_run(result.outcome, result.metadata.size_bytes, result.validation.confidence);

        info!(
            run_id = %result.run_id,
            outcome = %result.outcome,
            confidence = result.validation.confidence,
            attempts = result.metadata.attempt_count,
            generator_calls,
            duration_ms,
            "run completed"
        );
        Ok(result)
    }

    /// Template artifact for a fallback; reuses the last attempt's when it
    /// already is one.
    fn fallback_artifact(&self, run: &PipelineRun) -> ContentArtifact {
        match run.last_attempt() {
            Some(attempt) if attempt.artifact.is_template() => attempt.artifact.clone(),
            _ => self
                .generator
                .fallback(&run.request, &run.plan, &run.analysis.features),
        }
    }
}

/// Validation context for a run: prototypes must mention every planned page.
fn validation_context(run: &PipelineRun) -> ValidationContext {
    let kind = run.request.options.kind;
    ValidationContext {
        kind,
        description: run.request.description().to_string(),
        domain_hint: Some(run.plan.domain_category.label().to_string()),
        expected_terms: match kind {
            ArtifactKind::Prototype => run.plan.page_names(),
            ArtifactKind::Document => Vec::new(),
        },
        strictness: run.request.options.strictness,
    }
}

fn trace_state(run: &PipelineRun, state: ControllerState) {
    debug!(run_id = %run.id, attempt = run.attempts.len(), state = %state, "controller transition");
}

/// Await `future` unless `token` fires first.
async fn cancellable<F: Future>(token: &CancellationToken, future: F) -> AppResult<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            info!("generation cancelled");
            Err(AppError::Cancelled)
        }
        output = future => Ok(output),
    }
}
