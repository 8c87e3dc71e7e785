//! Event types for different topics.

use behavior_fsm::TransitionOutcome;
use game_core::EntityId;

use crate::advisor::AdvisorResponse;
use crate::behavior::HeroBehavior;
use crate::decision::Decision;
use crate::evaluator::UrgencyMode;
use crate::orchestrator::Route;

/// Events related to per-tick decisions
#[derive(Debug, Clone)]
pub enum DecisionEvent {
    /// A decision was produced and handed to the behavior state machine
    Applied {
        agent: EntityId,
        at_ms: u64,
        mode: UrgencyMode,
        score: f64,
        route: Route,
        decision: Decision,
        state: HeroBehavior,
        transition: TransitionOutcome,
    },

    /// A completed advisor reply was fused and written to the cache
    Cached {
        agent: EntityId,
        at_ms: u64,
        decision: Decision,
    },
}

/// Events related to the external advisor
#[derive(Debug, Clone)]
pub enum AdvisorEvent {
    /// A background query was launched for an agent
    Launched { agent: EntityId, at_ms: u64 },

    /// A background query finished (possibly as a fallback)
    Completed {
        agent: EntityId,
        response: AdvisorResponse,
    },

    /// The availability probe flipped
    AvailabilityChanged { available: bool },
}
