//! Services
//!
//! Pipeline stages and the shared state they report into.
//! `pipeline` wires the stages together; everything else is called by it.

pub mod analyzer;
pub mod architecture;
pub mod cache;
pub mod controller;
pub mod generator;
pub mod pipeline;
pub mod stats;
pub mod validation;

pub use analyzer::RequirementsAnalyzer;
pub use architecture::synthesize;
pub use cache::{fingerprint, ResultCache};
pub use controller::{decide, ControllerPolicy, ControllerState, Decision, DecisionInput};
pub use generator::{ContentGenerator, GenerationDirective};
pub use pipeline::GenerationPipeline;
pub use stats::{OutcomeCounts, QualityStats, StatsSnapshot};
pub use validation::{build_engine, LlmJudge};
