//! Concept Forge - Quality-Gated Concept Generation
//!
//! Turns a free-text product concept into a business document or a
//! single-page HTML prototype. It includes:
//! - Requirements analysis and architecture synthesis
//! - Content generation with structural completion and template fallback
//! - Semantic and heuristic validation, correction/enhancement control
//! - A result cache and quality statistics shared across runs
//! - JSON configuration and utilities

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::{GenerationOptions, GenerationRequest, GenerationResult, Outcome};
pub use services::{GenerationPipeline, QualityStats, ResultCache, StatsSnapshot};
pub use storage::{ForgeConfig, PipelineConfig};
pub use utils::error::{AppError, AppResult};
