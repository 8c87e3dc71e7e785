//! Per-tick inputs and outputs of the engine.

use behavior_fsm::TransitionOutcome;
use game_core::{EntityId, GameState, HeroState, TeamState, WorldView};

use crate::advisor::AdvisorResponse;
use crate::behavior::HeroBehavior;
use crate::decision::Decision;
use crate::evaluator::Evaluation;

/// Snapshots the simulation hands over for one agent and one tick.
#[derive(Clone, Debug, Default)]
pub struct TickInput {
    pub hero: HeroState,
    pub game: GameState,
    pub team: TeamState,
    pub world: WorldView,
    /// Target chosen by external targeting, used when no enemy hero is in range.
    pub best_target: Option<EntityId>,
}

impl TickInput {
    pub fn new(hero: HeroState, game: GameState, team: TeamState, world: WorldView) -> Self {
        Self {
            hero,
            game,
            team,
            world,
            best_target: None,
        }
    }

    pub fn with_best_target(mut self, target: Option<EntityId>) -> Self {
        self.best_target = target;
        self
    }
}

/// Which path produced the tick's decision.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    /// Extreme urgency: forced aggressive-posture local decision.
    Reflex,
    /// Urgent: reused a fresh cached decision.
    CacheHit,
    /// Balanced local decision, no advisor query launched.
    Local,
    /// Balanced local decision plus a background advisor query.
    AdvisorLaunched,
    /// Nothing pressing: passive local decision.
    Passive,
}

/// Everything one tick produced.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub evaluation: Evaluation,
    pub decision: Decision,
    pub route: Route,
    /// Behavior state after the transition attempt.
    pub state: HeroBehavior,
    pub transition: TransitionOutcome,
}

/// Message posted by a finished background query.
#[derive(Clone, Debug)]
pub(crate) struct AdvisorCompletion {
    /// Evaluation captured when the query was launched.
    pub evaluation: Evaluation,
    pub response: AdvisorResponse,
}
