//! Pipeline Run Models
//!
//! `PipelineRun` is the aggregate root of one generation: it records every
//! attempt the controller made and the final artifact. `GenerationResult` is
//! what the pipeline boundary hands back (and what the cache stores).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use concept_forge_quality_gates::{AggregatedValidation, ArtifactKind, ValidationReport};

use super::artifact::ContentArtifact;
use super::plan::{ArchitecturePlan, RequirementsAnalysis};
use super::request::{DomainCategory, GenerationRequest};

/// Why the generator was invoked for an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptKind {
    Initial,
    Correction,
    Enhancement,
}

/// Terminal quality provenance of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The first attempt passed the quality gate
    Accepted,
    /// A correction attempt passed the quality gate
    Corrected,
    /// An enhancement attempt passed the quality gate
    Enhanced,
    /// Generated content was discarded in favour of the local template
    Fallback,
}

impl Outcome {
    /// Outcome for an accepted attempt of the given kind.
    pub fn for_accepted(kind: AttemptKind) -> Self {
        match kind {
            AttemptKind::Initial => Outcome::Accepted,
            AttemptKind::Correction => Outcome::Corrected,
            AttemptKind::Enhancement => Outcome::Enhanced,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Accepted => write!(f, "accepted"),
            Outcome::Corrected => write!(f, "corrected"),
            Outcome::Enhanced => write!(f, "enhanced"),
            Outcome::Fallback => write!(f, "fallback"),
        }
    }
}

/// One generate-then-validate cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub kind: AttemptKind,
    pub artifact: ContentArtifact,
    pub reports: Vec<ValidationReport>,
    pub aggregated: AggregatedValidation,
}

/// Aggregate root for one generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub id: String,
    pub request: GenerationRequest,
    pub analysis: RequirementsAnalysis,
    pub plan: ArchitecturePlan,
    pub attempts: Vec<Attempt>,
    pub final_artifact: Option<ContentArtifact>,
    pub outcome: Option<Outcome>,
    pub cache_key: String,
}

impl PipelineRun {
    pub fn new(
        request: GenerationRequest,
        analysis: RequirementsAnalysis,
        plan: ArchitecturePlan,
        cache_key: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request,
            analysis,
            plan,
            attempts: Vec::new(),
            final_artifact: None,
            outcome: None,
            cache_key,
        }
    }

    pub fn push_attempt(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    pub fn last_attempt(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    /// Whether a terminal outcome and final artifact have been recorded.
    pub fn is_complete(&self) -> bool {
        self.final_artifact.is_some() && self.outcome.is_some()
    }

    /// Record the terminal outcome and build the boundary result.
    ///
    /// `validation` is the aggregate of the accepted attempt, or the last
    /// computed aggregate for a fallback.
    pub fn complete(
        &mut self,
        artifact: ContentArtifact,
        outcome: Outcome,
        validation: AggregatedValidation,
        generator_calls: u32,
        duration_ms: u64,
    ) -> GenerationResult {
        let metadata = GenerationMetadata {
            size_bytes: artifact.size_bytes,
            duration_ms,
            attempt_count: self.attempts.len() as u32,
            generator_calls,
            domain_category: self.plan.domain_category,
            kind: artifact.kind,
            cache_hit: false,
            generated_at: artifact.generated_at,
        };
        let result = GenerationResult {
            run_id: self.id.clone(),
            content: artifact.enhanced_content.clone(),
            artifact: artifact.clone(),
            validation,
            outcome,
            metadata,
        };
        self.final_artifact = Some(artifact);
        self.outcome = Some(outcome);
        result
    }
}

/// Basic metadata returned with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub size_bytes: usize,
    pub duration_ms: u64,
    /// Generate-then-validate cycles recorded in the run
    pub attempt_count: u32,
    /// Generative collaborator invocations for content
    pub generator_calls: u32,
    pub domain_category: DomainCategory,
    pub kind: ArtifactKind,
    /// Whether this result was served from the cache
    pub cache_hit: bool,
    pub generated_at: DateTime<Utc>,
}

/// What `GenerationPipeline::generate` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub run_id: String,
    /// Final (structurally completed) content
    pub content: String,
    pub artifact: ContentArtifact,
    pub validation: AggregatedValidation,
    pub outcome: Outcome,
    pub metadata: GenerationMetadata,
}
