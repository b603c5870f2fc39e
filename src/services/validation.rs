//! LLM-backed Semantic Judge
//!
//! Adapts an `LlmProvider` to the quality gates' `SemanticJudge` seam and
//! assembles the validation engine from configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use concept_forge_llm::{LlmError, LlmProvider, LlmRequestOptions, Message};
use concept_forge_quality_gates::{
    build_judge_prompt, HeuristicValidator, JudgeError, JudgeRequest, SemanticJudge,
    SemanticValidator, ValidationEngine,
};

use crate::storage::ForgeConfig;

/// Judging is a classification task; keep it close to deterministic
const JUDGE_TEMPERATURE: f32 = 0.1;

/// Output ceiling for a verdict
const JUDGE_MAX_TOKENS: u32 = 1024;

/// Semantic judge that asks an LLM for a JSON verdict.
pub struct LlmJudge {
    provider: Arc<dyn LlmProvider>,
}

impl LlmJudge {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SemanticJudge for LlmJudge {
    async fn judge(&self, request: JudgeRequest) -> Result<String, JudgeError> {
        let prompt = build_judge_prompt(&request);
        let response = self
            .provider
            .send_message(
                vec![Message::user(prompt)],
                None,
                LlmRequestOptions::new(JUDGE_TEMPERATURE, JUDGE_MAX_TOKENS),
            )
            .await
            .map_err(judge_error)?;
        Ok(response.text().to_string())
    }
}

fn judge_error(error: LlmError) -> JudgeError {
    match error {
        LlmError::NetworkError { .. }
        | LlmError::ProviderUnavailable { .. }
        | LlmError::Timeout { .. } => JudgeError::Unavailable(error.to_string()),
        other => JudgeError::Failed(other.to_string()),
    }
}

/// Build the validation engine: heuristic rules plus an LLM judge.
pub fn build_engine(config: &ForgeConfig, judge_provider: Arc<dyn LlmProvider>) -> ValidationEngine {
    let semantic = SemanticValidator::new(Arc::new(LlmJudge::new(judge_provider)))
        .with_max_excerpt_chars(config.pipeline.max_excerpt_chars)
        .with_timeout(Duration::from_secs(config.pipeline.call_timeout_secs));

    ValidationEngine::new(HeuristicValidator::default(), config.thresholds.clone()).with_semantic(semantic)
}
