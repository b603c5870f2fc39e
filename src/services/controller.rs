//! Enhancement/Correction Controller
//!
//! Pure decision logic for the generate/validate loop. Given the latest
//! aggregated verdict and how many cycles were already spent, `decide` picks
//! the next step. Rules are evaluated in order:
//!
//! 1. generated content, verified, confidence >= accept threshold: accept
//! 2. attempts remain, confidence below threshold, no correction yet: correct
//! 3. attempts remain, content too short, no enhancement yet: enhance
//! 4. otherwise: fall back to the template
//!
//! Each of correcting and enhancing happens at most once per run, so the
//! generator runs at most `1 + max_attempts` times.

use serde::{Deserialize, Serialize};

use concept_forge_quality_gates::AggregatedValidation;

use crate::storage::PipelineConfig;

/// Thresholds the controller decides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerPolicy {
    /// Correction/enhancement cycles allowed after the initial attempt
    pub max_attempts: u32,
    pub accept_confidence: u8,
    pub min_content_chars: usize,
}

impl Default for ControllerPolicy {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl ControllerPolicy {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            accept_confidence: config.accept_confidence,
            min_content_chars: config.min_content_chars,
        }
    }
}

/// Everything `decide` looks at for one attempt.
#[derive(Debug, Clone)]
pub struct DecisionInput<'a> {
    pub aggregated: &'a AggregatedValidation,
    /// False when the artifact came from the template instead of the collaborator
    pub generated: bool,
    /// Character count of the raw producer output
    pub content_chars: usize,
    /// Correction plus enhancement cycles already spent
    pub attempts_used: u32,
    pub corrections_used: u32,
    pub enhancements_used: u32,
}

/// Next step of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Correct,
    Enhance,
    Fallback,
}

/// Loop states, traced on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Generated,
    Validated,
    Accepted,
    Correcting,
    Enhancing,
    Fallback,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ControllerState::Generated => "generated",
            ControllerState::Validated => "validated",
            ControllerState::Accepted => "accepted",
            ControllerState::Correcting => "correcting",
            ControllerState::Enhancing => "enhancing",
            ControllerState::Fallback => "fallback",
        };
        write!(f, "{}", name)
    }
}

impl Decision {
    /// State the loop enters after this decision.
    pub fn next_state(self) -> ControllerState {
        match self {
            Decision::Accept => ControllerState::Accepted,
            Decision::Correct => ControllerState::Correcting,
            Decision::Enhance => ControllerState::Enhancing,
            Decision::Fallback => ControllerState::Fallback,
        }
    }
}

/// Decide the next step for the latest attempt.
pub fn decide(input: &DecisionInput<'_>, policy: &ControllerPolicy) -> Decision {
    let confidence = input.aggregated.confidence;
    let attempts_remain = input.attempts_used < policy.max_attempts;

    if input.generated && input.aggregated.verified && confidence >= policy.accept_confidence {
        return Decision::Accept;
    }
    if attempts_remain && confidence < policy.accept_confidence && input.corrections_used == 0 {
        return Decision::Correct;
    }
    if attempts_remain && input.content_chars < policy.min_content_chars && input.enhancements_used == 0 {
        return Decision::Enhance;
    }
    Decision::Fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use concept_forge_quality_gates::QualityStatus;

    fn verdict(confidence: u8, verified: bool) -> AggregatedValidation {
        AggregatedValidation {
            confidence,
            status: QualityStatus::Good,
            verified,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn input(aggregated: &AggregatedValidation) -> DecisionInput<'_> {
        DecisionInput {
            aggregated,
            generated: true,
            content_chars: 5_000,
            attempts_used: 0,
            corrections_used: 0,
            enhancements_used: 0,
        }
    }

    #[test]
    fn test_accept_when_verified_and_confident() {
        let policy = ControllerPolicy::default();
        let v = verdict(70, true);
        assert_eq!(decide(&input(&v), &policy), Decision::Accept);
    }

    #[test]
    fn test_unverified_high_confidence_is_not_accepted() {
        let policy = ControllerPolicy::default();
        // Confident but unverified, long enough, correction not applicable
        let v = verdict(90, false);
        assert_eq!(decide(&input(&v), &policy), Decision::Fallback);
    }

    #[test]
    fn test_template_artifact_is_never_accepted() {
        let policy = ControllerPolicy::default();
        let v = verdict(100, true);
        let mut i = input(&v);
        i.generated = false;
        assert_eq!(decide(&i, &policy), Decision::Fallback);
    }

    #[test]
    fn test_correct_before_enhance() {
        let policy = ControllerPolicy::default();
        let v = verdict(40, false);
        let mut i = input(&v);
        i.content_chars = 50;
        assert_eq!(decide(&i, &policy), Decision::Correct);

        i.attempts_used = 1;
        i.corrections_used = 1;
        assert_eq!(decide(&i, &policy), Decision::Enhance);

        i.attempts_used = 2;
        i.enhancements_used = 1;
        assert_eq!(decide(&i, &policy), Decision::Fallback);
    }

    #[test]
    fn test_no_attempts_means_fallback() {
        let policy = ControllerPolicy {
            max_attempts: 0,
            ..ControllerPolicy::default()
        };
        let v = verdict(10, false);
        let mut i = input(&v);
        i.content_chars = 10;
        assert_eq!(decide(&i, &policy), Decision::Fallback);
    }

    #[test]
    fn test_long_content_after_correction_falls_back() {
        let policy = ControllerPolicy::default();
        let v = verdict(50, false);
        let mut i = input(&v);
        i.attempts_used = 1;
        i.corrections_used = 1;
        assert_eq!(decide(&i, &policy), Decision::Fallback);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(Decision::Correct.next_state(), ControllerState::Correcting);
        assert_eq!(ControllerState::Enhancing.to_string(), "enhancing");
    }
}
