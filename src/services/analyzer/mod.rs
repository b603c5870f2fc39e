//! Requirements Analyzer
//!
//! Turns a generation request into a domain category and a ranked feature
//! list. Classification is deterministic; feature extraction consults the
//! generative collaborator and degrades to fixed defaults. The analyzer never
//! returns an error to its caller.

pub mod classifier;
pub mod features;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use concept_forge_llm::LlmProvider;

use crate::models::{DomainCategory, GenerationRequest, RequirementsAnalysis};

pub use classifier::DomainClassifier;
pub use features::{default_features, parse_features, tag_priority, FeatureExtractor};

/// Requirements analyzer: classifier plus feature extractor.
pub struct RequirementsAnalyzer {
    classifier: DomainClassifier,
    extractor: FeatureExtractor,
}

impl RequirementsAnalyzer {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        max_features: usize,
        extraction_max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            classifier: DomainClassifier::new(),
            extractor: FeatureExtractor::new(provider, max_features, extraction_max_tokens, timeout),
        }
    }

    /// Category for a request: the hint when it names a category, else
    /// keyword classification over description and requirements.
    pub fn categorize(&self, request: &GenerationRequest) -> (DomainCategory, bool) {
        if let Some(category) = request
            .domain_hint
            .as_deref()
            .and_then(DomainCategory::from_hint)
        {
            return (category, true);
        }

        let text = match request.requirements.as_deref() {
            Some(requirements) => format!("{}\n{}", request.description(), requirements),
            None => request.description().to_string(),
        };
        (self.classifier.classify(&text), false)
    }

    /// Analyze a request.
    pub async fn analyze(&self, request: &GenerationRequest) -> RequirementsAnalysis {
        let (domain_category, hinted) = self.categorize(request);
        let (features, feature_source) = self
            .extractor
            .extract(
                request.description(),
                request.requirements.as_deref(),
                domain_category,
            )
            .await;

        info!(
            category = %domain_category,
            hinted,
            features = features.len(),
            source = ?feature_source,
            "requirements analyzed"
        );

        RequirementsAnalysis {
            domain_category,
            hinted,
            features,
            feature_source,
        }
    }
}
