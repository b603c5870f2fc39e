//! Generation Request Models
//!
//! The immutable input to one pipeline run and the fixed domain category set.

use serde::{Deserialize, Serialize};

use concept_forge_quality_gates::{ArtifactKind, Strictness};

use crate::utils::error::{AppError, AppResult};

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Fixed set of domain categories the analyzer classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCategory {
    /// Dashboard-style SaaS products
    Saas,
    /// Two-sided marketplaces
    Marketplace,
    /// Single-merchant online stores
    Storefront,
    /// Task and project management tools
    TaskManager,
    /// Social and community platforms
    Community,
    /// Anything else
    Generic,
}

impl DomainCategory {
    /// All categories, in classification table order.
    pub const ALL: [DomainCategory; 6] = [
        DomainCategory::Saas,
        DomainCategory::Marketplace,
        DomainCategory::Storefront,
        DomainCategory::TaskManager,
        DomainCategory::Community,
        DomainCategory::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainCategory::Saas => "saas",
            DomainCategory::Marketplace => "marketplace",
            DomainCategory::Storefront => "storefront",
            DomainCategory::TaskManager => "task_manager",
            DomainCategory::Community => "community",
            DomainCategory::Generic => "generic",
        }
    }

    /// Human-readable label used in prompts and templates.
    pub fn label(&self) -> &'static str {
        match self {
            DomainCategory::Saas => "SaaS dashboard",
            DomainCategory::Marketplace => "online marketplace",
            DomainCategory::Storefront => "online storefront",
            DomainCategory::TaskManager => "task manager",
            DomainCategory::Community => "community platform",
            DomainCategory::Generic => "web product",
        }
    }

    /// Indefinite article for [`label`](Self::label).
    pub fn article(&self) -> &'static str {
        match self {
            DomainCategory::Marketplace | DomainCategory::Storefront => "an",
            DomainCategory::Saas
            | DomainCategory::TaskManager
            | DomainCategory::Community
            | DomainCategory::Generic => "a",
        }
    }

    /// Parse a domain hint, accepting canonical names and common aliases.
    ///
    /// Returns `None` for hints that name no known category.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let normalized: String = hint
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        let category = match normalized.as_str() {
            "saas" | "dashboard" | "analytics" | "b2b" => DomainCategory::Saas,
            "marketplace" | "two_sided" | "two_sided_marketplace" => DomainCategory::Marketplace,
            "storefront" | "ecommerce" | "e_commerce" | "shop" | "store" | "retail" => {
                DomainCategory::Storefront
            }
            "task_manager" | "taskmanager" | "tasks" | "todo" | "to_do" | "productivity"
            | "project_management" => DomainCategory::TaskManager,
            "community" | "social" | "forum" | "social_network" => DomainCategory::Community,
            "generic" | "other" => DomainCategory::Generic,
            _ => return None,
        };
        Some(category)
    }
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-request generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Which artifact family to produce
    #[serde(default)]
    pub kind: ArtifactKind,
    /// Free-form style direction ("minimal", "playful", ...)
    #[serde(default)]
    pub style: Option<String>,
    /// Heuristic penalty scaling
    #[serde(default)]
    pub strictness: Strictness,
    /// Output ceiling passed to the generative collaborator
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Passed through to the generative collaborator untouched
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            kind: ArtifactKind::default(),
            style: None,
            strictness: Strictness::default(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Input to one pipeline run. The pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub description: String,
    #[serde(default)]
    pub domain_hint: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            domain_hint: None,
            requirements: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_domain_hint(mut self, hint: impl Into<String>) -> Self {
        self.domain_hint = Some(hint.into());
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    pub fn with_kind(mut self, kind: ArtifactKind) -> Self {
        self.options.kind = kind;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Trimmed description.
    pub fn description(&self) -> &str {
        self.description.trim()
    }

    /// Domain category named by the hint, if any.
    ///
    /// An unknown hint is a configuration error: the data needed to degrade
    /// gracefully is itself invalid.
    pub fn domain_override(&self) -> AppResult<Option<DomainCategory>> {
        match self.domain_hint.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(hint) => DomainCategory::from_hint(hint)
                .map(Some)
                .ok_or_else(|| AppError::config(format!("Unknown domain hint '{}'", hint))),
        }
    }

    /// Reject malformed requests before any stage runs.
    pub fn validate(&self) -> AppResult<()> {
        let chars = self.description().chars().count();
        if chars == 0 {
            return Err(AppError::config("Description must not be empty"));
        }
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(AppError::config(format!(
                "Description is {} characters; the maximum is {}",
                chars, MAX_DESCRIPTION_CHARS
            )));
        }

        self.domain_override()?;

        let temperature = self.options.temperature;
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(AppError::config(format!(
                "Temperature {} is outside 0.0..=2.0",
                temperature
            )));
        }
        if self.options.max_output_tokens == 0 {
            return Err(AppError::config("max_output_tokens must be greater than zero"));
        }
        Ok(())
    }
}
