//! JSON Configuration Management
//!
//! Loads `ForgeConfig` from `~/.concept-forge/config.json` (or an explicit
//! path), applies environment overrides, and validates the result.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use concept_forge_llm::ProviderConfig;
use concept_forge_quality_gates::ValidationThresholds;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Environment variable overriding the provider API key
pub const ENV_API_KEY: &str = "CONCEPT_FORGE_API_KEY";
/// Environment variable overriding the provider model
pub const ENV_MODEL: &str = "CONCEPT_FORGE_MODEL";
/// Environment variable overriding the provider base URL
pub const ENV_BASE_URL: &str = "CONCEPT_FORGE_BASE_URL";

/// Upper bound on correction/enhancement cycles per run
const MAX_ATTEMPTS_LIMIT: u32 = 5;

/// Upper bound on extracted features
const MAX_FEATURES_LIMIT: usize = 10;

/// Tunables for the generation pipeline and its controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Correction/enhancement cycles allowed after the initial attempt
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Minimum aggregated confidence for acceptance
    #[serde(default = "default_accept_confidence")]
    pub accept_confidence: u8,
    /// Raw content shorter than this (in chars) is "too short"
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,
    /// Wall-clock budget for each external call
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    /// Result cache capacity; 0 disables caching
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Upper bound on the generation instruction, in chars
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Artifact excerpt sent to the semantic judge, in chars
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,
    /// Output ceiling for the feature extraction call
    #[serde(default = "default_extraction_max_tokens")]
    pub extraction_max_tokens: u32,
}

fn default_max_attempts() -> u32 {
    2
}

fn default_accept_confidence() -> u8 {
    70
}

fn default_min_content_chars() -> usize {
    800
}

fn default_call_timeout_secs() -> u64 {
    60
}

fn default_cache_capacity() -> usize {
    128
}

fn default_max_prompt_chars() -> usize {
    12_000
}

fn default_max_features() -> usize {
    10
}

fn default_max_excerpt_chars() -> usize {
    6_000
}

fn default_extraction_max_tokens() -> u32 {
    512
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            accept_confidence: default_accept_confidence(),
            min_content_chars: default_min_content_chars(),
            call_timeout_secs: default_call_timeout_secs(),
            cache_capacity: default_cache_capacity(),
            max_prompt_chars: default_max_prompt_chars(),
            max_features: default_max_features(),
            max_excerpt_chars: default_max_excerpt_chars(),
            extraction_max_tokens: default_extraction_max_tokens(),
        }
    }
}

impl PipelineConfig {
    /// Validate the pipeline settings
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(format!(
                "maxAttempts must be at most {}, got {}",
                MAX_ATTEMPTS_LIMIT, self.max_attempts
            ));
        }
        if self.accept_confidence > 100 {
            return Err("acceptConfidence must be within 0..=100".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("callTimeoutSecs must be greater than zero".to_string());
        }
        if self.max_prompt_chars < 1000 {
            return Err("maxPromptChars must be at least 1000".to_string());
        }
        if self.max_features == 0 || self.max_features > MAX_FEATURES_LIMIT {
            return Err(format!("maxFeatures must be within 1..={}", MAX_FEATURES_LIMIT));
        }
        if self.max_excerpt_chars == 0 {
            return Err("maxExcerptChars must be greater than zero".to_string());
        }
        if self.extraction_max_tokens == 0 {
            return Err("extractionMaxTokens must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Complete application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForgeConfig {
    /// Generative collaborator
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Semantic judge; `None` reuses the generative provider
    #[serde(default)]
    pub judge: Option<ProviderConfig>,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub thresholds: ValidationThresholds,
}

impl ForgeConfig {
    /// Load from the default path, falling back to defaults when absent.
    pub fn load_default() -> AppResult<Self> {
        Self::load(&config_path()?)
    }

    /// Load from `path`, apply environment overrides, validate.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration with pretty formatting
    pub fn save(&self, path: &Path) -> AppResult<()> {
        self.validate().map_err(AppError::config)?;
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply provider overrides from a variable lookup (the process environment in `load`).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.provider.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.provider.base_url = Some(url);
        }
    }

    /// Provider settings for the semantic judge.
    pub fn judge_provider(&self) -> &ProviderConfig {
        self.judge.as_ref().unwrap_or(&self.provider)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        validate_provider("provider", &self.provider)?;
        if let Some(judge) = &self.judge {
            validate_provider("judge", judge)?;
        }
        self.pipeline.validate()?;
        self.thresholds.validate()?;
        Ok(())
    }
}

fn validate_provider(label: &str, provider: &ProviderConfig) -> Result<(), String> {
    if provider.model.trim().is_empty() {
        return Err(format!("{}.model must not be empty", label));
    }
    if !(0.0..=2.0).contains(&provider.temperature) {
        return Err(format!("{}.temperature must be within 0.0..=2.0", label));
    }
    if provider.max_tokens == 0 {
        return Err(format!("{}.maxTokens must be greater than zero", label));
    }
    Ok(())
}
