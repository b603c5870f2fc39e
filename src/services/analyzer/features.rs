//! Feature Extraction
//!
//! Asks the generative collaborator for a feature list and parses the first
//! usable JSON fragment in its reply. Any failure (transport error, timeout,
//! no parsable fragment, empty list) degrades to the category's fixed
//! default feature list. Extraction never returns an error.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use concept_forge_core::{extract_typed, truncate_chars};
use concept_forge_llm::{LlmProvider, LlmRequestOptions, Message};

use crate::models::{DomainCategory, FeatureItem, FeatureSource, Priority};

/// Low temperature keeps extraction close to the description
const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Description budget inside the extraction instruction
const EXTRACTION_INPUT_CHARS: usize = 4000;

// ============================================================================
// Extraction Instruction
// ============================================================================

const EXTRACTION_SYSTEM_PROMPT: &str = r#"You extract product features from a concept description.

Respond with ONLY a JSON array, most important feature first:
[
  {"name": "Short feature name", "priority": "high" | "medium" | "low"}
]

At most 10 entries. No markdown fences, no explanatory text."#;

// ============================================================================
// Default Feature Tables
// ============================================================================

/// Fixed per-category feature lists used when extraction fails.
static DEFAULT_FEATURES: &[(DomainCategory, &[(&str, Priority)])] = &[
    (
        DomainCategory::Saas,
        &[
            ("User accounts and team workspaces", Priority::High),
            ("Analytics dashboard", Priority::High),
            ("Subscription billing", Priority::High),
            ("Role-based permissions", Priority::Medium),
            ("Data export and reports", Priority::Medium),
            ("Email notifications", Priority::Low),
        ],
    ),
    (
        DomainCategory::Marketplace,
        &[
            ("Seller listings", Priority::High),
            ("Search and filters", Priority::High),
            ("Ordering workflow", Priority::High),
            ("Secure payments", Priority::High),
            ("Reviews and ratings", Priority::Medium),
            ("Buyer and seller messaging", Priority::Medium),
            ("Seller payouts dashboard", Priority::Low),
        ],
    ),
    (
        DomainCategory::Storefront,
        &[
            ("Product catalog", Priority::High),
            ("Shopping cart", Priority::High),
            ("Checkout and payments", Priority::High),
            ("Order tracking", Priority::Medium),
            ("Product search", Priority::Medium),
            ("Customer reviews", Priority::Low),
        ],
    ),
    (
        DomainCategory::TaskManager,
        &[
            ("Task creation and editing", Priority::High),
            ("Due dates and reminders", Priority::High),
            ("Kanban board", Priority::Medium),
            ("Team assignment", Priority::Medium),
            ("Progress reports", Priority::Low),
        ],
    ),
    (
        DomainCategory::Community,
        &[
            ("Member profiles", Priority::High),
            ("Discussion posts and comments", Priority::High),
            ("Groups and topics", Priority::Medium),
            ("Event calendar", Priority::Medium),
            ("Notifications", Priority::Low),
            ("Moderation tools", Priority::Low),
        ],
    ),
    (
        DomainCategory::Generic,
        &[
            ("User accounts", Priority::High),
            ("Core workflow", Priority::High),
            ("Search", Priority::Medium),
            ("Contact form", Priority::Medium),
            ("Notifications", Priority::Low),
        ],
    ),
];

/// Default feature list for a category, truncated to `max_features`.
pub fn default_features(category: DomainCategory, max_features: usize) -> Vec<FeatureItem> {
    DEFAULT_FEATURES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, features)| *features)
        .unwrap_or(&[])
        .iter()
        .take(max_features)
        .map(|(name, priority)| FeatureItem::new(*name, *priority))
        .collect()
}

// ============================================================================
// Response Parsing
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFeature {
    Name(String),
    Detailed {
        #[serde(alias = "feature", alias = "title")]
        name: String,
        #[serde(default)]
        priority: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureEnvelope {
    List(Vec<RawFeature>),
    Wrapped { features: Vec<RawFeature> },
}

impl FeatureEnvelope {
    fn into_features(self) -> Vec<RawFeature> {
        match self {
            FeatureEnvelope::List(features) | FeatureEnvelope::Wrapped { features } => features,
        }
    }
}

/// Tag a feature's priority by keywords in its name.
///
/// `core`/`required`/`must`/`essential` mean high, `important`/`should`
/// mean medium, anything else is low.
pub fn tag_priority(name: &str) -> Priority {
    let lower = name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |keys: &[&str]| words.iter().any(|w| keys.contains(w));

    if has(&["core", "required", "must", "essential"]) {
        Priority::High
    } else if has(&["important", "should"]) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Parse a collaborator reply into a normalized feature list.
///
/// Names are trimmed, empty names dropped, duplicates removed
/// case-insensitively, and the list truncated to `max_features`. An explicit
/// priority is honoured only when it parses. Returns `None` when no usable
/// fragment is found or the list ends up empty.
pub fn parse_features(reply: &str, max_features: usize) -> Option<Vec<FeatureItem>> {
    let envelope = extract_typed::<FeatureEnvelope>(reply)?;
    let mut seen = HashSet::new();

    let features: Vec<FeatureItem> = envelope
        .into_features()
        .into_iter()
        .filter_map(|raw| {
            let (name, explicit) = match raw {
                RawFeature::Name(name) => (name, None),
                RawFeature::Detailed { name, priority } => (name, priority),
            };
            let name = name.trim().to_string();
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                return None;
            }
            let priority = explicit
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_else(|| tag_priority(&name));
            Some(FeatureItem::new(name, priority))
        })
        .take(max_features)
        .collect();

    if features.is_empty() {
        None
    } else {
        Some(features)
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Feature extractor backed by the generative collaborator.
pub struct FeatureExtractor {
    provider: Arc<dyn LlmProvider>,
    max_features: usize,
    max_tokens: u32,
    timeout: Duration,
}

impl FeatureExtractor {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        max_features: usize,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            max_features,
            max_tokens,
            timeout,
        }
    }

    /// Extract features, degrading to the category defaults on any failure.
    pub async fn extract(
        &self,
        description: &str,
        requirements: Option<&str>,
        category: DomainCategory,
    ) -> (Vec<FeatureItem>, FeatureSource) {
        match self.try_extract(description, requirements).await {
            Some(features) => {
                debug!(count = features.len(), "features extracted");
                (features, FeatureSource::Extracted)
            }
            None => (
                default_features(category, self.max_features),
                FeatureSource::Default,
            ),
        }
    }

    async fn try_extract(&self, description: &str, requirements: Option<&str>) -> Option<Vec<FeatureItem>> {
        let mut user = format!(
            "Concept description:\n{}",
            truncate_chars(description, EXTRACTION_INPUT_CHARS)
        );
        if let Some(requirements) = requirements.filter(|r| !r.trim().is_empty()) {
            user.push_str("\n\nAdditional requirements:\n");
            user.push_str(truncate_chars(requirements, EXTRACTION_INPUT_CHARS));
        }

        let call = self.provider.send_message(
            vec![Message::user(user)],
            Some(EXTRACTION_SYSTEM_PROMPT.to_string()),
            LlmRequestOptions::new(EXTRACTION_TEMPERATURE, self.max_tokens),
        );

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "feature extraction failed, using default features");
                return None;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "feature extraction timed out, using default features"
                );
                return None;
            }
        };

        let parsed = parse_features(response.text(), self.max_features);
        if parsed.is_none() {
            warn!("feature extraction reply had no usable list, using default features");
        }
        parsed
    }
}
