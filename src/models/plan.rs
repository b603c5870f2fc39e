//! Analysis & Architecture Models
//!
//! Feature lists produced by the requirements analyzer and the structural
//! plan derived from them by the architecture synthesizer.

use serde::{Deserialize, Serialize};

use super::request::DomainCategory;

/// Priority tag for an extracted feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse an explicit priority label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" | "critical" | "p0" | "p1" => Some(Priority::High),
            "medium" | "normal" | "p2" => Some(Priority::Medium),
            "low" | "p3" | "nice-to-have" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// One feature of the requested product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureItem {
    pub name: String,
    pub priority: Priority,
}

impl FeatureItem {
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

/// Where the feature list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureSource {
    /// Parsed from the generative collaborator's reply
    Extracted,
    /// The category's fixed default list
    Default,
}

/// Output of the requirements analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsAnalysis {
    pub domain_category: DomainCategory,
    /// Whether the category came from the request's domain hint
    pub hinted: bool,
    pub features: Vec<FeatureItem>,
    pub feature_source: FeatureSource,
}

/// A page (or document section) in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSpec {
    pub name: String,
    pub route: String,
    pub purpose: String,
}

/// A UI component in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub purpose: String,
}

/// A persisted data entity in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub fields: Vec<String>,
}

/// Technology selection for a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TechnologyBundle {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub database: Vec<String>,
    pub integrations: Vec<String>,
}

impl TechnologyBundle {
    /// Every technology in bundle order.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.frontend
            .iter()
            .chain(&self.backend)
            .chain(&self.database)
            .chain(&self.integrations)
    }
}

/// Structural plan for one run. Pure derived data, never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitecturePlan {
    pub domain_category: DomainCategory,
    pub pages: Vec<PageSpec>,
    pub components: Vec<ComponentSpec>,
    pub technologies: TechnologyBundle,
    pub data_entities: Vec<EntitySpec>,
}

impl ArchitecturePlan {
    pub fn page_names(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.name.clone()).collect()
    }

    /// Compact plain-text rendering embedded in generation prompts.
    pub fn summary(&self) -> String {
        let pages = self
            .pages
            .iter()
            .map(|p| format!("- {} ({}): {}", p.name, p.route, p.purpose))
            .collect::<Vec<_>>()
            .join("\n");
        let components = self
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let entities = self
            .data_entities
            .iter()
            .map(|e| format!("{} [{}]", e.name, e.fields.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");

        format!(
            "Category: {}\nPages:\n{}\nComponents: {}\nData entities: {}\n\
             Frontend: {}\nBackend: {}\nDatabase: {}\nIntegrations: {}",
            self.domain_category.label(),
            pages,
            components,
            entities,
            self.technologies.frontend.join(", "),
            self.technologies.backend.join(", "),
            self.technologies.database.join(", "),
            self.technologies.integrations.join(", "),
        )
    }
}
