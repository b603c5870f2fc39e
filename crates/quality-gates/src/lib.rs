//! Concept Forge Quality Gates
//!
//! Validation engine for generated artifacts. This crate has no knowledge of
//! how artifacts are generated; it only judges them:
//!
//! - `models` - Validation data types (ValidationReport, AggregatedValidation, thresholds, etc.)
//! - `semantic` - Semantic validator delegating to an external judge (SemanticJudge trait)
//! - `heuristic` - Deterministic rule checks per artifact kind
//! - `engine` - Concurrent fan-out/fan-in over both validators plus aggregation
//!
//! The LLM-backed judge implementation lives in the main crate's
//! `services::validation` module.

pub mod engine;
pub mod heuristic;
pub mod models;
pub mod semantic;

// Re-export core model types
pub use models::{
    AggregatedValidation, ArtifactKind, QualityStatus, Strictness, ValidationContext,
    ValidationReport, ValidationSource, ValidationThresholds, UNAVAILABLE_CONFIDENCE,
    UNAVAILABLE_ISSUE,
};

// Re-export engine types
pub use engine::{aggregate, classify_status, ValidationEngine, ValidationOutcome};

// Re-export validators
pub use heuristic::{DocumentRules, HeuristicValidator, PrototypeRules};
pub use semantic::{build_judge_prompt, JudgeError, JudgeRequest, SemanticJudge, SemanticValidator};
