//! Generation Prompts
//!
//! Builds the system and user messages for each generation directive. The
//! user message is bounded to `max_prompt_chars`.

use concept_forge_core::truncate_chars;
use concept_forge_quality_gates::ArtifactKind;

use crate::models::{ArchitecturePlan, FeatureItem, GenerationRequest};

use super::GenerationDirective;

// ============================================================================
// System Prompts
// ============================================================================

const DOCUMENT_SYSTEM_PROMPT: &str = r#"You are a senior business analyst writing a concept document.

Write Markdown. Start with a single level-one heading (# Title). Include these sections as
level-two headings (## Section):
Executive Summary, Problem, Solution, Target Market, Business Model, Features.
Use concrete numbers (market size, pricing, targets). Do not wrap the answer in code fences."#;

const PROTOTYPE_SYSTEM_PROMPT: &str = r#"You are a front-end engineer building a clickable prototype.

Produce ONE self-contained HTML page: doctype, <head> with viewport meta and a <style> block,
a <body> with a navigation entry and a section for every planned page, realistic copy,
and a <script> that makes navigation and forms interactive. No external assets.
Return only the HTML, without code fences or commentary."#;

/// System message for an artifact kind.
pub fn system_prompt(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Document => DOCUMENT_SYSTEM_PROMPT,
        ArtifactKind::Prototype => PROTOTYPE_SYSTEM_PROMPT,
    }
}

/// Build the user message for a directive, bounded to `max_prompt_chars`.
pub fn build_user_prompt(
    request: &GenerationRequest,
    plan: &ArchitecturePlan,
    features: &[FeatureItem],
    directive: &GenerationDirective,
    max_prompt_chars: usize,
) -> String {
    // Previous content gets at most half of the budget
    let description_budget = max_prompt_chars / 4;
    let previous_budget = max_prompt_chars / 2;

    let mut prompt = format!(
        "Create a {} for this concept:\n{}\n",
        request.options.kind,
        truncate_chars(request.description(), description_budget)
    );

    if let Some(requirements) = request
        .requirements
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        prompt.push_str("\nRequirements:\n");
        prompt.push_str(truncate_chars(requirements, description_budget));
        prompt.push('\n');
    }
    if let Some(style) = request.options.style.as_deref().filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!("\nStyle: {}\n", style.trim()));
    }

    prompt.push_str("\nArchitecture plan:\n");
    prompt.push_str(&plan.summary());
    prompt.push_str("\n\nFeatures (priority):\n");
    for feature in features {
        prompt.push_str(&format!("- {} ({})\n", feature.name, feature.priority));
    }

    match directive {
        GenerationDirective::Initial => {}
        GenerationDirective::Correct { previous, issues } => {
            prompt.push_str("\nYour previous version had these problems. Fix these problems and return the complete revised version:\n");
            for issue in issues {
                prompt.push_str(&format!("- {}\n", issue));
            }
            prompt.push_str("\nPrevious version:\n");
            prompt.push_str(truncate_chars(previous, previous_budget));
            prompt.push('\n');
        }
        GenerationDirective::Enhance { previous } => {
            prompt.push_str("\nYour previous version was too short. Add more depth and detail to every section and return the complete expanded version.\n");
            prompt.push_str("\nPrevious version:\n");
            prompt.push_str(truncate_chars(previous, previous_budget));
            prompt.push('\n');
        }
    }

    truncate_chars(&prompt, max_prompt_chars).to_string()
}
