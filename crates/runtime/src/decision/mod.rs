//! Local heuristic decision making.
//!
//! The decision layer is split in three:
//!
//! - [`situation`]: raw [`WorldView`](game_core::WorldView) → [`Situation`]
//! - [`strategy`]: difficulty-tiered action selection and target acquisition
//! - [`maker`]: the rate-limited [`DecisionMaker`] owning the dice
//!
//! Every path produces a [`Decision`]; there is no failure mode.

pub mod maker;
pub mod situation;
pub mod strategy;

pub use maker::DecisionMaker;
pub use situation::{Situation, SituationAnalyzer};

use std::fmt;
use std::str::FromStr;

use game_core::EntityId;

/// High-level action handed to the behavior executor.
///
/// Advisor replies that name an unknown action survive as [`Action::Custom`],
/// which maps to no behavior state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    AllIn,
    Attack,
    Harass,
    Retreat,
    Back,
    PushObjective,
    Farm,
    Dodge,
    FarmSafe,
    Jungle,
    Custom(String),
}

impl Action {
    /// Actions the safety override refuses to commit to at high survival risk.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::AllIn | Action::Attack | Action::Harass)
    }

    /// Actions that never carry a target.
    pub fn is_disengage(&self) -> bool {
        matches!(self, Action::Retreat | Action::Back | Action::Dodge)
    }

    /// Canonical wire spelling, e.g. `ALL_IN`.
    pub fn as_str(&self) -> &str {
        match self {
            Action::AllIn => "ALL_IN",
            Action::Attack => "ATTACK",
            Action::Harass => "HARASS",
            Action::Retreat => "RETREAT",
            Action::Back => "BACK",
            Action::PushObjective => "PUSH_OBJECTIVE",
            Action::Farm => "FARM",
            Action::Dodge => "DODGE",
            Action::FarmSafe => "FARM_SAFE",
            Action::Jungle => "JUNGLE",
            Action::Custom(name) => name,
        }
    }

    /// The built-in vocabulary, used when prompting the advisor.
    pub const VOCABULARY: [&'static str; 10] = [
        "ALL_IN",
        "ATTACK",
        "HARASS",
        "RETREAT",
        "BACK",
        "PUSH_OBJECTIVE",
        "FARM",
        "DODGE",
        "FARM_SAFE",
        "JUNGLE",
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = std::convert::Infallible;

    /// Parses an action name case-insensitively. Unknown names become
    /// [`Action::Custom`] with the upper-cased text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        let action = match name.as_str() {
            "ALL_IN" => Action::AllIn,
            "ATTACK" => Action::Attack,
            "HARASS" => Action::Harass,
            "RETREAT" => Action::Retreat,
            "BACK" => Action::Back,
            "PUSH_OBJECTIVE" => Action::PushObjective,
            "FARM" => Action::Farm,
            "DODGE" => Action::Dodge,
            "FARM_SAFE" => Action::FarmSafe,
            "JUNGLE" => Action::Jungle,
            _ => Action::Custom(name),
        };
        Ok(action)
    }
}

/// How a decision was produced when an advisor reply was involved.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FusionType {
    /// Confident advisor reply taken as-is.
    ExternalDominant,
    /// Low-confidence advisor action with combined reasoning.
    Blended,
    /// Aggressive action replaced by a retreat.
    SafetyOverride,
}

/// Posture applied to the situation before strategy selection.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Aggressiveness {
    Aggressive,
    #[default]
    Balanced,
    Passive,
}

/// Chosen action with its target and a human-readable reason.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub target: Option<EntityId>,
    pub reasoning: String,
    /// Set only when the decision went through response fusion.
    pub fusion: Option<FusionType>,
}

impl Decision {
    pub fn new(action: Action, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            target: None,
            reasoning: reasoning.into(),
            fusion: None,
        }
    }

    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => write!(f, "{} -> {} ({})", self.action, target, self.reasoning),
            None => write!(f, "{} ({})", self.action, self.reasoning),
        }
    }
}
