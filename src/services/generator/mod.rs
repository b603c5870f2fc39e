//! Content Generator
//!
//! Produces one artifact per invocation: builds the prompt for the current
//! directive, calls the generative collaborator under a timeout, and runs
//! structural completion over the reply. Any collaborator failure (error,
//! timeout, empty reply) yields a template artifact instead, so `generate`
//! always returns something the validators can score.

pub mod fallback;
pub mod prompt;
pub mod structure;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use concept_forge_llm::{LlmProvider, LlmRequestOptions, Message};

use crate::models::{
    ArchitecturePlan, ArtifactSource, ContentArtifact, FeatureItem, GenerationRequest,
};

pub use structure::{complete, title_from_description, StructureContext, META_MARKER};

/// What the generator is asked to do on this invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationDirective {
    /// First attempt from the plan alone
    Initial,
    /// Rewrite the previous content, fixing the listed issues
    Correct {
        previous: String,
        issues: Vec<String>,
    },
    /// Expand the previous content
    Enhance { previous: String },
}

impl GenerationDirective {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationDirective::Initial => "initial",
            GenerationDirective::Correct { .. } => "correct",
            GenerationDirective::Enhance { .. } => "enhance",
        }
    }
}

/// Collaborator-backed content generator.
pub struct ContentGenerator {
    provider: Arc<dyn LlmProvider>,
    max_prompt_chars: usize,
    call_timeout: Duration,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, max_prompt_chars: usize, call_timeout: Duration) -> Self {
        Self {
            provider,
            max_prompt_chars,
            call_timeout,
        }
    }

    /// Generate one artifact. Never fails: collaborator problems yield the
    /// template artifact.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        plan: &ArchitecturePlan,
        features: &[FeatureItem],
        directive: &GenerationDirective,
    ) -> ContentArtifact {
        let kind = request.options.kind;
        let user = prompt::build_user_prompt(request, plan, features, directive, self.max_prompt_chars);
        let options = LlmRequestOptions::new(request.options.temperature, request.options.max_output_tokens);

        let call = self.provider.send_message(
            vec![Message::user(user)],
            Some(prompt::system_prompt(kind).to_string()),
            options,
        );

        let raw = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(response)) => {
                let text = response.text().trim().to_string();
                if text.is_empty() || structure::strip_code_fences(&text).is_empty() {
                    warn!(directive = directive.label(), "generator returned empty content, using template");
                    None
                } else {
                    Some(text)
                }
            }
            Ok(Err(e)) => {
                warn!(directive = directive.label(), error = %e, "generator call failed, using template");
                None
            }
            Err(_) => {
                warn!(
                    directive = directive.label(),
                    timeout_secs = self.call_timeout.as_secs(),
                    "generator call timed out, using template"
                );
                None
            }
        };

        match raw {
            Some(raw) => {
                let enhanced = complete(kind, &raw, &structure_context(request, plan));
                debug!(
                    directive = directive.label(),
                    raw_chars = raw.chars().count(),
                    size_bytes = enhanced.len(),
                    "content generated"
                );
                ContentArtifact::new(kind, raw, enhanced, ArtifactSource::Generated)
            }
            None => self.fallback(request, plan, features),
        }
    }

    /// Deterministic template artifact for a request.
    pub fn fallback(
        &self,
        request: &GenerationRequest,
        plan: &ArchitecturePlan,
        features: &[FeatureItem],
    ) -> ContentArtifact {
        template_artifact(request, plan, features)
    }
}

/// Template artifact, completed like generated content.
pub fn template_artifact(
    request: &GenerationRequest,
    plan: &ArchitecturePlan,
    features: &[FeatureItem],
) -> ContentArtifact {
    let kind = request.options.kind;
    let ctx = structure_context(request, plan);
    let raw = fallback::render(kind, &ctx.title, request.description(), plan, features);
    let enhanced = complete(kind, &raw, &ctx);
    ContentArtifact::new(kind, raw, enhanced, ArtifactSource::Template)
}

fn structure_context(request: &GenerationRequest, plan: &ArchitecturePlan) -> StructureContext {
    StructureContext {
        title: title_from_description(request.description()),
        category: plan.domain_category,
    }
}
