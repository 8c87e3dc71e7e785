//! Advisor/local response fusion.
//!
//! [`merge`] combines an advisor reply with the local decision for the same
//! evaluation. The survival safety check always runs last, so no advisor
//! confidence can push an aggressive action through a near-lethal situation.

use crate::advisor::AdvisorResponse;
use crate::decision::{Action, Decision, FusionType};
use crate::evaluator::{Evaluation, Layer};

/// Advisor confidence at which its reply is taken as-is.
pub const DOMINANT_CONFIDENCE: f64 = 0.7;
/// Survival score above which aggressive actions are overridden.
pub const SAFETY_SURVIVAL_SCORE: f64 = 80.0;

pub const SAFETY_REASONING: &str = "Safety override: survival risk too high";

/// Fuses `external` into `local`.
///
/// # Rules
///
/// 1. No reply or a fallback: the local decision
/// 2. Confidence ≥ 0.7: advisor action and reasoning ([`FusionType::ExternalDominant`])
/// 3. Otherwise: advisor action with combined reasoning ([`FusionType::Blended`])
/// 4. Survival above 80 with an aggressive action: [`Action::Retreat`]
///    ([`FusionType::SafetyOverride`])
///
/// The target always comes from the local decision; a retreat drops it.
pub fn merge(external: Option<&AdvisorResponse>, local: &Decision, evaluation: &Evaluation) -> Decision {
    let fused = match external {
        Some(response) if !response.is_fallback() => fuse(response, local),
        _ => local.clone(),
    };

    apply_safety(fused, evaluation)
}

fn fuse(response: &AdvisorResponse, local: &Decision) -> Decision {
    if response.confidence >= DOMINANT_CONFIDENCE {
        Decision {
            action: response.action(),
            target: local.target,
            reasoning: response.reasoning.clone(),
            fusion: Some(FusionType::ExternalDominant),
        }
    } else {
        // The advisor's action is kept even at low confidence; only the
        // reasoning records the local alternative.
        Decision {
            action: response.action(),
            target: local.target,
            reasoning: format!("Blended: {} (local: {})", response.decision, local.action),
            fusion: Some(FusionType::Blended),
        }
    }
}

fn apply_safety(decision: Decision, evaluation: &Evaluation) -> Decision {
    if evaluation.layer(Layer::Survival) > SAFETY_SURVIVAL_SCORE && decision.action.is_aggressive() {
        tracing::debug!(
            hero = %evaluation.hero_id,
            overridden = %decision.action,
            "safety override"
        );
        return Decision {
            action: Action::Retreat,
            target: None,
            reasoning: SAFETY_REASONING.to_string(),
            fusion: Some(FusionType::SafetyOverride),
        };
    }

    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{LayerScores, UrgencyMode, Weights};
    use game_core::EntityId;

    fn evaluation(survival: f64) -> Evaluation {
        Evaluation {
            score: 60.0,
            mode: UrgencyMode::Planning,
            scores: LayerScores::from_fn(|layer| if layer == Layer::Survival { survival } else { 0.0 }),
            weights: Weights::BASE,
            confidence: 0.5,
            rationale: String::new(),
            timestamp_ms: 0,
            hero_id: EntityId(1),
        }
    }

    fn reply(decision: &str, confidence: f64) -> AdvisorResponse {
        AdvisorResponse {
            decision: decision.to_string(),
            reasoning: "advisor says so".to_string(),
            confidence,
            provider: "scripted".to_string(),
            latency_ms: 12,
        }
    }

    fn local() -> Decision {
        Decision::new(Action::Farm, "Farming lane").with_target(Some(EntityId(20)))
    }

    #[test]
    fn no_reply_keeps_local() {
        let merged = merge(None, &local(), &evaluation(10.0));
        assert_eq!(merged, local());
    }

    #[test]
    fn fallback_keeps_local() {
        let fallback = AdvisorResponse::fallback("timeout");
        let merged = merge(Some(&fallback), &local(), &evaluation(10.0));
        assert_eq!(merged, local());
    }

    #[test]
    fn confident_reply_dominates() {
        let merged = merge(Some(&reply("HARASS", 0.7)), &local(), &evaluation(10.0));
        assert_eq!(merged.action, Action::Harass);
        assert_eq!(merged.reasoning, "advisor says so");
        assert_eq!(merged.fusion, Some(FusionType::ExternalDominant));
        assert_eq!(merged.target, Some(EntityId(20)));
    }

    #[test]
    fn low_confidence_still_takes_external_action() {
        let merged = merge(Some(&reply("PUSH_OBJECTIVE", 0.4)), &local(), &evaluation(10.0));
        assert_eq!(merged.action, Action::PushObjective);
        assert_eq!(merged.reasoning, "Blended: PUSH_OBJECTIVE (local: FARM)");
        assert_eq!(merged.fusion, Some(FusionType::Blended));
    }

    #[test]
    fn safety_beats_full_confidence() {
        let merged = merge(Some(&reply("ALL_IN", 1.0)), &local(), &evaluation(85.0));
        assert_eq!(merged.action, Action::Retreat);
        assert_eq!(merged.reasoning, SAFETY_REASONING);
        assert_eq!(merged.fusion, Some(FusionType::SafetyOverride));
        assert_eq!(merged.target, None);
    }

    #[test]
    fn safety_applies_to_local_decisions_too() {
        let attack = Decision::new(Action::Attack, "Favorable fight");
        let merged = merge(None, &attack, &evaluation(90.0));
        assert_eq!(merged.action, Action::Retreat);
    }

    #[test]
    fn safety_threshold_is_exclusive() {
        let merged = merge(Some(&reply("ATTACK", 0.9)), &local(), &evaluation(80.0));
        assert_eq!(merged.action, Action::Attack);
    }

    #[test]
    fn passive_actions_pass_safety() {
        let merged = merge(Some(&reply("FARM_SAFE", 0.9)), &local(), &evaluation(95.0));
        assert_eq!(merged.action, Action::FarmSafe);
    }
}
