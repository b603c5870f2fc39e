//! Content Artifact Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use concept_forge_quality_gates::ArtifactKind;

/// Provenance of an artifact's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSource {
    /// Produced by the generative collaborator
    Generated,
    /// Built from local templates and the architecture plan
    Template,
}

impl std::fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactSource::Generated => write!(f, "generated"),
            ArtifactSource::Template => write!(f, "template"),
        }
    }
}

/// One generated (or templated) artifact.
///
/// `raw_content` is the unmodified producer output; `enhanced_content` is the
/// same text after structural completion. Both are kept for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentArtifact {
    pub kind: ArtifactKind,
    pub raw_content: String,
    pub enhanced_content: String,
    /// Byte length of `enhanced_content`
    pub size_bytes: usize,
    pub generated_at: DateTime<Utc>,
    pub source: ArtifactSource,
}

impl ContentArtifact {
    pub fn new(
        kind: ArtifactKind,
        raw_content: String,
        enhanced_content: String,
        source: ArtifactSource,
    ) -> Self {
        Self {
            kind,
            size_bytes: enhanced_content.len(),
            raw_content,
            enhanced_content,
            generated_at: Utc::now(),
            source,
        }
    }

    /// Character count of the unmodified producer output.
    pub fn raw_chars(&self) -> usize {
        self.raw_content.chars().count()
    }

    pub fn is_template(&self) -> bool {
        self.source == ArtifactSource::Template
    }
}
