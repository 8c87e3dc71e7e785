//! Hero behavior states and their transition graph.
//!
//! The hero machine is a [`StateMachine`] over [`HeroBehavior`] with
//! [`Situation`] as guard context. Every state other than
//! [`HeroBehavior::Retreating`] can fall back to it.

use behavior_fsm::{StateMachine, TransitionTable};
use game_core::AiParameters;

use crate::decision::{Action, Situation};

/// Own health percentage a retreating hero needs before returning to lane.
pub const RECOVERED_HEALTH: f32 = 70.0;
/// A push is abandoned once fewer allied minions than this remain.
pub const PUSH_ABANDON_MINIONS: usize = 2;

/// Behavior state the executor runs for a hero.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HeroBehavior {
    #[default]
    Laning,
    Fighting,
    Retreating,
    Pushing,
    Dodging,
    Jungling,
}

impl HeroBehavior {
    /// State an action asks for. `FarmSafe` and custom actions map to none.
    pub fn for_action(action: &Action) -> Option<Self> {
        match action {
            Action::AllIn | Action::Attack | Action::Harass => Some(Self::Fighting),
            Action::Retreat | Action::Back => Some(Self::Retreating),
            Action::PushObjective | Action::Farm => Some(Self::Pushing),
            Action::Dodge => Some(Self::Dodging),
            Action::Jungle => Some(Self::Jungling),
            Action::FarmSafe | Action::Custom(_) => None,
        }
    }
}

pub type HeroStateMachine = StateMachine<HeroBehavior, Situation>;

/// Builds the hero transition graph.
///
/// Push thresholds come from `parameters`, so each agent's machine reflects
/// its own tuning.
pub fn transitions(parameters: &AiParameters) -> TransitionTable<HeroBehavior, Situation> {
    use HeroBehavior::*;

    let push_threshold = parameters.push_minion_threshold;

    TransitionTable::new()
        // Laning
        .edge(Laning, Dodging, |s: &Situation| s.has_projectiles())
        .edge(Laning, Retreating, |s: &Situation| s.should_retreat)
        .edge(Laning, Fighting, |s: &Situation| {
            s.has_enemies() && (s.can_kill || s.has_advantage)
        })
        .edge(Laning, Pushing, move |s: &Situation| {
            s.ally_minions.len() >= push_threshold && !s.has_enemies()
        })
        .edge(Laning, Jungling, |s: &Situation| {
            !s.jungle_camps.is_empty() && !s.has_enemies() && s.enemy_minions.is_empty()
        })
        // Fighting
        .edge(Fighting, Dodging, |s: &Situation| s.has_projectiles())
        .edge(Fighting, Retreating, |s: &Situation| s.should_retreat)
        .edge(Fighting, Laning, |s: &Situation| !s.has_enemies())
        // Retreating
        .edge(Retreating, Dodging, |s: &Situation| s.has_projectiles())
        .edge(Retreating, Laning, |s: &Situation| {
            s.health_percent > RECOVERED_HEALTH && !s.in_danger
        })
        // Pushing
        .edge(Pushing, Dodging, |s: &Situation| s.has_projectiles())
        .edge(Pushing, Retreating, |s: &Situation| s.should_retreat)
        .edge(Pushing, Fighting, |s: &Situation| s.has_enemies() && s.has_advantage)
        .edge(Pushing, Laning, |s: &Situation| {
            s.ally_minions.len() < PUSH_ABANDON_MINIONS
        })
        // Dodging
        .edge(Dodging, Retreating, |s: &Situation| s.should_retreat)
        .edge(Dodging, Fighting, |s: &Situation| {
            !s.has_projectiles() && s.has_enemies() && s.has_advantage
        })
        .edge(Dodging, Laning, |s: &Situation| !s.has_projectiles())
        // Jungling
        .edge(Jungling, Dodging, |s: &Situation| s.has_projectiles())
        .edge(Jungling, Retreating, |s: &Situation| s.should_retreat)
        .edge(Jungling, Fighting, |s: &Situation| s.has_enemies() && s.can_kill)
        .edge(Jungling, Laning, |s: &Situation| s.jungle_camps.is_empty())
}

/// Creates a hero machine in [`HeroBehavior::Laning`].
pub fn hero_machine(parameters: &AiParameters) -> HeroStateMachine {
    StateMachine::new(HeroBehavior::default(), transitions(parameters))
}
