//! Semantic Validator
//!
//! Delegates judgment of an artifact to an external judging collaborator and
//! defensively extracts a structured verdict from its reply. Any failure
//! (transport error, timeout, no parsable verdict) degrades to the
//! conservative `ValidationReport::unavailable` placeholder.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use concept_forge_core::{extract_typed, truncate_chars};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ValidationContext, ValidationReport, ValidationSource};

/// Default excerpt size sent to the judge
const DEFAULT_MAX_EXCERPT_CHARS: usize = 6_000;

/// Default time budget for one judge call
const DEFAULT_JUDGE_TIMEOUT_SECS: u64 = 45;

/// Request sent to a judging collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    /// Artifact text, truncated to the validator's excerpt budget
    pub artifact_excerpt: String,
    /// What the artifact was supposed to be
    pub context_description: String,
    /// Domain category or hint, if known
    pub domain_hint: Option<String>,
}

/// Errors a judging collaborator may report.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("Judge unavailable: {0}")]
    Unavailable(String),

    #[error("Judge call failed: {0}")]
    Failed(String),
}

/// External collaborator that returns a text blob expected to embed a verdict.
#[async_trait]
pub trait SemanticJudge: Send + Sync {
    /// Ask the collaborator to judge one artifact excerpt.
    async fn judge(&self, request: JudgeRequest) -> Result<String, JudgeError>;
}

/// Verdict shape expected inside the judge's reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SemanticVerdict {
    pub verified: bool,
    #[serde(alias = "score")]
    pub confidence: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl SemanticVerdict {
    /// Convert into a report, clamping confidence into 0..=100.
    pub fn into_report(self) -> ValidationReport {
        let confidence = if self.confidence.is_finite() {
            self.confidence.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        ValidationReport::new(
            ValidationSource::Semantic,
            self.verified,
            confidence,
            self.issues,
            self.recommendations,
        )
    }
}

/// Render the instruction a text-generating model needs to act as a judge.
pub fn build_judge_prompt(request: &JudgeRequest) -> String {
    let domain = request.domain_hint.as_deref().unwrap_or("unspecified");
    format!(
        r#"You are a strict reviewer of generated business artifacts.

Requested artifact: {}
Domain: {}

Judge whether the artifact below is complete, specific to the request, internally
consistent, and free of placeholder text. Respond with JSON only, in this exact shape:
{{
  "verified": true,
  "confidence": 0-100,
  "issues": ["short description of each problem"],
  "recommendations": ["short actionable fix"]
}}

Artifact:
```
{}
```"#,
        request.context_description, domain, request.artifact_excerpt
    )
}

/// Validator that consults a `SemanticJudge`.
pub struct SemanticValidator {
    judge: Arc<dyn SemanticJudge>,
    max_excerpt_chars: usize,
    timeout: Duration,
}

impl SemanticValidator {
    /// Create a validator with default excerpt size and timeout.
    pub fn new(judge: Arc<dyn SemanticJudge>) -> Self {
        Self {
            judge,
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
            timeout: Duration::from_secs(DEFAULT_JUDGE_TIMEOUT_SECS),
        }
    }

    /// Set the excerpt budget via builder pattern.
    pub fn with_max_excerpt_chars(mut self, max_excerpt_chars: usize) -> Self {
        self.max_excerpt_chars = max_excerpt_chars;
        self
    }

    /// Set the per-call timeout via builder pattern.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the judge request for an artifact.
    pub fn build_request(&self, content: &str, ctx: &ValidationContext) -> JudgeRequest {
        JudgeRequest {
            artifact_excerpt: truncate_chars(content, self.max_excerpt_chars).to_string(),
            context_description: format!("{} for: {}", ctx.kind, ctx.description),
            domain_hint: ctx.domain_hint.clone(),
        }
    }

    /// Extract a report from a judge reply, if it embeds a verdict.
    pub fn parse_response(&self, response: &str) -> Option<ValidationReport> {
        extract_typed::<SemanticVerdict>(response).map(SemanticVerdict::into_report)
    }

    /// Judge an artifact. Never fails; degrades to the unavailable placeholder.
    pub async fn validate(&self, content: &str, ctx: &ValidationContext) -> ValidationReport {
        let request = self.build_request(content, ctx);

        let reply = match tokio::time::timeout(self.timeout, self.judge.judge(request)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!(error = %e, "semantic judge failed, using placeholder verdict");
                return ValidationReport::unavailable(ValidationSource::Semantic);
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "semantic judge timed out, using placeholder verdict"
                );
                return ValidationReport::unavailable(ValidationSource::Semantic);
            }
        };

        match self.parse_response(&reply) {
            Some(report) => {
                debug!(
                    confidence = report.confidence,
                    verified = report.verified,
                    issues = report.issues.len(),
                    "semantic verdict parsed"
                );
                report
            }
            None => {
                warn!("semantic judge reply had no parsable verdict");
                ValidationReport::unavailable(ValidationSource::Semantic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactKind;

    struct FixedJudge(Result<&'static str, &'static str>);

    #[async_trait]
    impl SemanticJudge for FixedJudge {
        async fn judge(&self, _request: JudgeRequest) -> Result<String, JudgeError> {
            self.0
                .map(str::to_string)
                .map_err(|e| JudgeError::Failed(e.to_string()))
        }
    }

    struct SlowJudge;

    #[async_trait]
    impl SemanticJudge for SlowJudge {
        async fn judge(&self, _request: JudgeRequest) -> Result<String, JudgeError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(r#"{"verified": true, "confidence": 99}"#.to_string())
        }
    }

    fn ctx() -> ValidationContext {
        ValidationContext {
            kind: ArtifactKind::Document,
            description: "Meal-kit subscription".to_string(),
            domain_hint: Some("storefront".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_verdict_embedded_in_prose() {
        let judge = FixedJudge(Ok(
            "Overall decent.\n```json\n{\"verified\": true, \"confidence\": 82.6, \"issues\": [\"thin pricing\"]}\n```",
        ));
        let validator = SemanticValidator::new(Arc::new(judge));
        let report = validator.validate("# Plan", &ctx()).await;
        assert_eq!(report.source, ValidationSource::Semantic);
        assert!(report.verified);
        assert_eq!(report.confidence, 83);
        assert_eq!(report.issues, vec!["thin pricing".to_string()]);
    }

    #[tokio::test]
    async fn test_score_alias_and_clamping() {
        let judge = FixedJudge(Ok(r#"{"verified": false, "score": 140}"#));
        let validator = SemanticValidator::new(Arc::new(judge));
        let report = validator.validate("# Plan", &ctx()).await;
        assert_eq!(report.confidence, 100);
        assert!(!report.verified);
    }

    #[tokio::test]
    async fn test_unparsable_reply_degrades() {
        let judge = FixedJudge(Ok("Looks great to me!"));
        let validator = SemanticValidator::new(Arc::new(judge));
        let report = validator.validate("# Plan", &ctx()).await;
        assert_eq!(report, ValidationReport::unavailable(ValidationSource::Semantic));
    }

    #[tokio::test]
    async fn test_judge_error_degrades() {
        let judge = FixedJudge(Err("connection refused"));
        let validator = SemanticValidator::new(Arc::new(judge));
        let report = validator.validate("# Plan", &ctx()).await;
        assert_eq!(report.confidence, 30);
        assert!(!report.verified);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_degrades() {
        let validator =
            SemanticValidator::new(Arc::new(SlowJudge)).with_timeout(Duration::from_secs(5));
        let report = validator.validate("# Plan", &ctx()).await;
        assert_eq!(report.issues, vec!["validation unavailable".to_string()]);
    }

    #[test]
    fn test_request_excerpt_is_bounded() {
        let validator =
            SemanticValidator::new(Arc::new(FixedJudge(Ok("")))).with_max_excerpt_chars(10);
        let request = validator.build_request(&"x".repeat(100), &ctx());
        assert_eq!(request.artifact_excerpt.len(), 10);
        assert!(request.context_description.starts_with("document for:"));
        assert_eq!(request.domain_hint.as_deref(), Some("storefront"));
    }

    #[test]
    fn test_judge_prompt_embeds_request() {
        let request = JudgeRequest {
            artifact_excerpt: "<html></html>".to_string(),
            context_description: "prototype for: pet sitting app".to_string(),
            domain_hint: None,
        };
        let prompt = build_judge_prompt(&request);
        assert!(prompt.contains("pet sitting app"));
        assert!(prompt.contains("Domain: unspecified"));
        assert!(prompt.contains("<html></html>"));
    }
}
