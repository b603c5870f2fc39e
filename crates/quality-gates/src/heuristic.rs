//! Heuristic Validator
//!
//! Deterministic rule checks over an artifact's text and structure. Every
//! validation starts at a confidence of 100; each failed rule appends one
//! issue and one recommendation and subtracts its (strictness-scaled)
//! penalty, with a floor of 0.

use concept_forge_core::word_count;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    ArtifactKind, Strictness, ValidationContext, ValidationReport, ValidationSource,
};

// ============================================================================
// Rule Tables
// ============================================================================

/// Rules applied to Markdown business documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRules {
    /// Section keywords that must appear in some heading
    pub required_sections: Vec<String>,
    pub missing_section_penalty: u8,
    pub min_bytes: usize,
    pub min_bytes_penalty: u8,
    pub max_bytes: usize,
    pub max_bytes_penalty: u8,
    pub min_words: usize,
    pub min_words_penalty: u8,
    /// Minimum count of tokens containing a digit
    pub min_numeric_tokens: usize,
    pub numeric_penalty: u8,
}

impl Default for DocumentRules {
    fn default() -> Self {
        Self {
            required_sections: [
                "Executive Summary",
                "Problem",
                "Solution",
                "Target Market",
                "Business Model",
                "Features",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            missing_section_penalty: 10,
            min_bytes: 1500,
            min_bytes_penalty: 15,
            max_bytes: 200 * 1024,
            max_bytes_penalty: 10,
            min_words: 250,
            min_words_penalty: 15,
            min_numeric_tokens: 5,
            numeric_penalty: 10,
        }
    }
}

/// Rules applied to single-page HTML prototypes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrototypeRules {
    pub structure_penalty: u8,
    pub viewport_penalty: u8,
    pub styling_penalty: u8,
    pub script_penalty: u8,
    pub min_bytes: usize,
    pub min_bytes_penalty: u8,
    pub max_bytes: usize,
    pub max_bytes_penalty: u8,
    /// Minimum words of visible text (tags, scripts and styles removed)
    pub min_visible_words: usize,
    pub min_words_penalty: u8,
    pub expected_terms_penalty: u8,
}

impl Default for PrototypeRules {
    fn default() -> Self {
        Self {
            structure_penalty: 20,
            viewport_penalty: 10,
            styling_penalty: 10,
            script_penalty: 10,
            min_bytes: 2000,
            min_bytes_penalty: 15,
            max_bytes: 500 * 1024,
            max_bytes_penalty: 10,
            min_visible_words: 80,
            min_words_penalty: 15,
            expected_terms_penalty: 10,
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Running score for one validation pass.
struct Scorecard {
    strictness: Strictness,
    confidence: u8,
    issues: Vec<String>,
    recommendations: Vec<String>,
}

impl Scorecard {
    fn new(ctx: &ValidationContext) -> Self {
        Self {
            strictness: ctx.strictness,
            confidence: 100,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn fail(&mut self, penalty: u8, issue: String, recommendation: impl Into<String>) {
        let scaled = self.strictness.scale(penalty);
        self.confidence = self.confidence.saturating_sub(scaled);
        self.issues.push(issue);
        self.recommendations.push(recommendation.into());
    }

    fn finish(self, verify_min: u8) -> ValidationReport {
        ValidationReport::new(
            ValidationSource::Heuristic,
            self.confidence >= verify_min,
            self.confidence,
            self.issues,
            self.recommendations,
        )
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Deterministic rule-based validator.
#[derive(Debug, Clone)]
pub struct HeuristicValidator {
    document: DocumentRules,
    prototype: PrototypeRules,
    verify_min: u8,
}

impl Default for HeuristicValidator {
    fn default() -> Self {
        Self::new(DocumentRules::default(), PrototypeRules::default(), 60)
    }
}

impl HeuristicValidator {
    pub fn new(document: DocumentRules, prototype: PrototypeRules, verify_min: u8) -> Self {
        Self {
            document,
            prototype,
            verify_min,
        }
    }

    /// Set the minimum confidence for `verified` via builder pattern.
    pub fn with_verify_min(mut self, verify_min: u8) -> Self {
        self.verify_min = verify_min;
        self
    }

    pub fn document_rules(&self) -> &DocumentRules {
        &self.document
    }

    pub fn prototype_rules(&self) -> &PrototypeRules {
        &self.prototype
    }

    /// Run the rule set for the context's artifact kind.
    pub fn validate(&self, content: &str, ctx: &ValidationContext) -> ValidationReport {
        let report = match ctx.kind {
            ArtifactKind::Document => self.validate_document(content, ctx),
            ArtifactKind::Prototype => self.validate_prototype(content, ctx),
        };
        debug!(
            kind = %ctx.kind,
            confidence = report.confidence,
            issues = report.issues.len(),
            "heuristic validation finished"
        );
        report
    }

    fn validate_document(&self, content: &str, ctx: &ValidationContext) -> ValidationReport {
        let rules = &self.document;
        let mut card = Scorecard::new(ctx);

        let headings: Vec<String> = content
            .lines()
            .map(str::trim_start)
            .filter(|line| line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        for section in &rules.required_sections {
            let needle = section.to_lowercase();
            if !headings.iter().any(|h| h.contains(&needle)) {
                card.fail(
                    rules.missing_section_penalty,
                    format!("Missing required section: {}", section),
                    format!("Add a '{}' section with concrete details", section),
                );
            }
        }

        check_size(
            &mut card,
            content.len(),
            rules.min_bytes,
            rules.min_bytes_penalty,
            rules.max_bytes,
            rules.max_bytes_penalty,
        );

        let words = word_count(content);
        if words < rules.min_words {
            card.fail(
                rules.min_words_penalty,
                format!("Document too brief: {} words (minimum {})", words, rules.min_words),
                "Expand each section with specifics and examples",
            );
        }

        let numeric = numeric_tokens(content);
        if numeric < rules.min_numeric_tokens {
            card.fail(
                rules.numeric_penalty,
                format!(
                    "Too few quantitative details: {} numeric values (minimum {})",
                    numeric, rules.min_numeric_tokens
                ),
                "Add figures such as market size, pricing, and growth targets",
            );
        }

        card.finish(self.verify_min)
    }

    fn validate_prototype(&self, content: &str, ctx: &ValidationContext) -> ValidationReport {
        let rules = &self.prototype;
        let mut card = Scorecard::new(ctx);
        let lower = content.to_ascii_lowercase();

        let missing: Vec<&str> = [
            ("<!doctype html", "doctype"),
            ("<html", "html"),
            ("<head", "head"),
            ("<body", "body"),
        ]
        .iter()
        .filter(|(marker, _)| !lower.contains(marker))
        .map(|(_, name)| *name)
        .collect();
        if !missing.is_empty() {
            card.fail(
                rules.structure_penalty,
                format!("Incomplete HTML structure: missing {}", missing.join(", ")),
                "Provide a full document with doctype, html, head and body",
            );
        }

        if !lower.contains("name=\"viewport\"") && !lower.contains("name='viewport'") {
            card.fail(
                rules.viewport_penalty,
                "Missing viewport meta tag".to_string(),
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            );
        }

        if !lower.contains("<style") && !lower.contains("stylesheet") {
            card.fail(
                rules.styling_penalty,
                "No styling present".to_string(),
                "Add a <style> block or stylesheet link",
            );
        }

        if !lower.contains("<script") {
            card.fail(
                rules.script_penalty,
                "No interactivity: page has no script".to_string(),
                "Add a <script> handling navigation or form interactions",
            );
        }

        check_size(
            &mut card,
            content.len(),
            rules.min_bytes,
            rules.min_bytes_penalty,
            rules.max_bytes,
            rules.max_bytes_penalty,
        );

        let visible = visible_text(content);
        let words = word_count(&visible);
        if words < rules.min_visible_words {
            card.fail(
                rules.min_words_penalty,
                format!(
                    "Too little visible text: {} words (minimum {})",
                    words, rules.min_visible_words
                ),
                "Fill the page with realistic copy for each section",
            );
        }

        let visible_lower = visible.to_lowercase();
        let absent: Vec<&str> = ctx
            .expected_terms
            .iter()
            .filter(|term| !visible_lower.contains(&term.to_lowercase()))
            .map(String::as_str)
            .collect();
        if !absent.is_empty() {
            card.fail(
                rules.expected_terms_penalty,
                format!("Planned pages not represented: {}", absent.join(", ")),
                "Add a section or navigation entry for every planned page",
            );
        }

        card.finish(self.verify_min)
    }
}

fn check_size(
    card: &mut Scorecard,
    size: usize,
    min_bytes: usize,
    min_penalty: u8,
    max_bytes: usize,
    max_penalty: u8,
) {
    if size < min_bytes {
        card.fail(
            min_penalty,
            format!("Content too short: {} bytes (minimum {})", size, min_bytes),
            "Add more depth and detail",
        );
    } else if size > max_bytes {
        card.fail(
            max_penalty,
            format!("Content too long: {} bytes (maximum {})", size, max_bytes),
            "Trim repeated or filler content",
        );
    }
}

/// Count whitespace-separated tokens containing at least one ASCII digit.
pub fn numeric_tokens(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.bytes().any(|b| b.is_ascii_digit()))
        .count()
}

/// Strip tags plus `<script>`/`<style>` bodies, leaving the visible text.
pub fn visible_text(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len() / 2);
    let mut pos = 0;

    while pos < html.len() {
        let Some(rel) = lower[pos..].find('<') else {
            out.push_str(&html[pos..]);
            break;
        };
        let tag_start = pos + rel;
        out.push_str(&html[pos..tag_start]);
        out.push(' ');

        let rest = &lower[tag_start..];
        let skip_block = ["script", "style"].iter().find_map(|name| {
            let open = format!("<{}", name);
            let after = rest.as_bytes().get(open.len()).copied();
            let is_tag = matches!(after, Some(b'>' | b' ' | b'\t' | b'\n' | b'\r'));
            (rest.starts_with(&open) && is_tag).then(|| format!("</{}", name))
        });

        pos = match skip_block {
            Some(close) => match lower[tag_start..].find(&close) {
                Some(close_rel) => {
                    let close_at = tag_start + close_rel;
                    lower[close_at..]
                        .find('>')
                        .map(|gt| close_at + gt + 1)
                        .unwrap_or(html.len())
                }
                None => html.len(),
            },
            None => lower[tag_start..]
                .find('>')
                .map(|gt| tag_start + gt + 1)
                .unwrap_or(html.len()),
        };
    }

    out
}
