//! Domain Classifier
//!
//! Rule-based classification of a concept description into a
//! `DomainCategory`. Each category has a table of word-boundary regex
//! patterns with integer weights; the category with the highest summed
//! weight wins. Ties go to the earlier category in table order, and a zero
//! score means `Generic`.

use regex::Regex;

use crate::models::DomainCategory;

/// Pattern entry: compiled regex + associated weight.
struct PatternEntry {
    regex: Regex,
    weight: u32,
}

/// Keyword classifier over the fixed category set.
pub struct DomainClassifier {
    table: Vec<(DomainCategory, Vec<PatternEntry>)>,
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainClassifier {
    /// Create a new classifier with compiled regex patterns.
    pub fn new() -> Self {
        Self {
            table: vec![
                (
                    DomainCategory::Saas,
                    Self::compile_patterns(&[
                        (r"(?i)\bsaas\b", 3),
                        (r"(?i)\bdashboards?\b", 2),
                        (r"(?i)\b(b2b|crm|erp)\b", 2),
                        (r"(?i)\bsubscriptions?\b", 1),
                        (r"(?i)\b(analytics|metrics|reporting)\b", 1),
                        (r"(?i)\b(api|integrations?|workspaces?)\b", 1),
                    ]),
                ),
                (
                    DomainCategory::Marketplace,
                    Self::compile_patterns(&[
                        (r"(?i)\bmarketplaces?\b", 3),
                        (r"(?i)\bbuyers?\b.*\bsellers?\b", 2),
                        (r"(?i)\btwo-sided\b", 2),
                        (r"(?i)\blistings?\b", 1),
                        (r"(?i)\b(vendors?|sellers?|hosts?|providers?)\b", 1),
                        (r"(?i)\bconnect(s|ing)?\b", 1),
                        (r"(?i)\b(commissions?|booking)\b", 1),
                    ]),
                ),
                (
                    DomainCategory::Storefront,
                    Self::compile_patterns(&[
                        (r"(?i)\b(e-?commerce|storefront|online store)\b", 3),
                        (r"(?i)\bshop(s|ping)?\b", 2),
                        (r"(?i)\b(cart|checkout)\b", 1),
                        (r"(?i)\bproducts?\b", 1),
                        (r"(?i)\b(retail|merchandise|catalog(ue)?|inventory)\b", 1),
                    ]),
                ),
                (
                    DomainCategory::TaskManager,
                    Self::compile_patterns(&[
                        (r"(?i)\b(task|to-?do)\s+(manager|list|app|tracker)s?\b", 3),
                        (r"(?i)\bproject management\b", 2),
                        (r"(?i)\b(tasks?|to-?dos?)\b", 1),
                        (r"(?i)\b(deadlines?|reminders?|kanban|sprints?)\b", 1),
                        (r"(?i)\bproductivity\b", 1),
                    ]),
                ),
                (
                    DomainCategory::Community,
                    Self::compile_patterns(&[
                        (r"(?i)\b(community|communities|forums?|social network)\b", 3),
                        (r"(?i)\bsocial\b", 2),
                        (r"(?i)\b(members?|followers?|profiles?)\b", 1),
                        (r"(?i)\b(posts?|discussions?|threads?|groups?)\b", 1),
                        (r"(?i)\b(events?|meetups?)\b", 1),
                    ]),
                ),
            ],
        }
    }

    /// Classify free text into a category.
    pub fn classify(&self, text: &str) -> DomainCategory {
        let mut best = (DomainCategory::Generic, 0u32);
        for (category, score) in self.scores(text) {
            // Strictly greater keeps the earlier category on ties
            if score > best.1 {
                best = (category, score);
            }
        }
        best.0
    }

    /// Summed pattern weight per category, in table order.
    pub fn scores(&self, text: &str) -> Vec<(DomainCategory, u32)> {
        self.table
            .iter()
            .map(|(category, patterns)| {
                let score = patterns
                    .iter()
                    .filter(|entry| entry.regex.is_match(text))
                    .map(|entry| entry.weight)
                    .sum();
                (*category, score)
            })
            .collect()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn compile_patterns(raw: &[(&str, u32)]) -> Vec<PatternEntry> {
        raw.iter()
            .filter_map(|(pattern, weight)| {
                Regex::new(pattern).ok().map(|regex| PatternEntry {
                    regex,
                    weight: *weight,
                })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
