//! Difficulty tiers and AI tuning tables.
//!
//! [`AiConfig`] is built once when an agent is created and passed by value or
//! reference to everything that needs tuning data. It replaces any global
//! mutable settings object: lookups are plain reads of an immutable struct.

/// Difficulty tier of an agent.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

/// Per-difficulty behavior knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyProfile {
    /// Minimum time between strategy re-evaluations.
    pub decision_interval_ms: u64,
    /// Delay behavior execution applies before reacting to a new decision.
    pub reaction_time_ms: u64,
    /// Chance to harass when it is safe to do so.
    pub harass_probability: f64,
    /// Chance to dodge a detected projectile.
    pub dodge_probability: f64,
    /// Health percentage below which the agent retreats.
    pub retreat_health_threshold: f32,
    /// Scales how eagerly behavior execution commits to fights (0..=1).
    pub aggression: f32,
}

impl DifficultyProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                decision_interval_ms: 1000,
                reaction_time_ms: 600,
                harass_probability: 0.2,
                dodge_probability: 0.1,
                retreat_health_threshold: 20.0,
                aggression: 0.3,
            },
            Difficulty::Normal => Self {
                decision_interval_ms: 500,
                reaction_time_ms: 350,
                harass_probability: 0.3,
                dodge_probability: 0.3,
                retreat_health_threshold: 25.0,
                aggression: 0.5,
            },
            Difficulty::Hard => Self {
                decision_interval_ms: 300,
                reaction_time_ms: 200,
                harass_probability: 0.5,
                dodge_probability: 0.6,
                retreat_health_threshold: 30.0,
                aggression: 0.7,
            },
            Difficulty::Expert => Self {
                decision_interval_ms: 200,
                reaction_time_ms: 100,
                harass_probability: 0.7,
                dodge_probability: 0.9,
                retreat_health_threshold: 30.0,
                aggression: 0.85,
            },
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

/// Named tuning values shared by the analyzer and behavior execution.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AiParameter {
    EnemyDetectionRadius,
    AllyDetectionRadius,
    MinionDetectionRadius,
    TowerRange,
    JungleCampRadius,
    HeroRadius,
    ProjectileLookahead,
    PushMinionThreshold,
    CriticalHealth,
}

/// Geometry and threshold table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiParameters {
    pub enemy_detection_radius: f32,
    pub ally_detection_radius: f32,
    pub minion_detection_radius: f32,
    pub tower_range: f32,
    pub jungle_camp_radius: f32,
    pub hero_radius: f32,
    /// Seconds of projectile travel considered when predicting hits.
    pub projectile_lookahead: f32,
    /// Allied minions required before pushing.
    pub push_minion_threshold: usize,
    /// Health percentage that always forces a retreat.
    pub critical_health: f32,
}

impl AiParameters {
    pub const DEFAULT_ENEMY_DETECTION_RADIUS: f32 = 800.0;
    pub const DEFAULT_ALLY_DETECTION_RADIUS: f32 = 800.0;
    pub const DEFAULT_MINION_DETECTION_RADIUS: f32 = 600.0;
    pub const DEFAULT_TOWER_RANGE: f32 = 750.0;
    pub const DEFAULT_JUNGLE_CAMP_RADIUS: f32 = 700.0;
    pub const DEFAULT_HERO_RADIUS: f32 = 40.0;
    pub const DEFAULT_PROJECTILE_LOOKAHEAD: f32 = 1.0;
    pub const DEFAULT_PUSH_MINION_THRESHOLD: usize = 3;
    pub const DEFAULT_CRITICAL_HEALTH: f32 = 20.0;

    pub fn get(&self, parameter: AiParameter) -> f32 {
        match parameter {
            AiParameter::EnemyDetectionRadius => self.enemy_detection_radius,
            AiParameter::AllyDetectionRadius => self.ally_detection_radius,
            AiParameter::MinionDetectionRadius => self.minion_detection_radius,
            AiParameter::TowerRange => self.tower_range,
            AiParameter::JungleCampRadius => self.jungle_camp_radius,
            AiParameter::HeroRadius => self.hero_radius,
            AiParameter::ProjectileLookahead => self.projectile_lookahead,
            AiParameter::PushMinionThreshold => self.push_minion_threshold as f32,
            AiParameter::CriticalHealth => self.critical_health,
        }
    }
}

impl Default for AiParameters {
    fn default() -> Self {
        Self {
            enemy_detection_radius: Self::DEFAULT_ENEMY_DETECTION_RADIUS,
            ally_detection_radius: Self::DEFAULT_ALLY_DETECTION_RADIUS,
            minion_detection_radius: Self::DEFAULT_MINION_DETECTION_RADIUS,
            tower_range: Self::DEFAULT_TOWER_RANGE,
            jungle_camp_radius: Self::DEFAULT_JUNGLE_CAMP_RADIUS,
            hero_radius: Self::DEFAULT_HERO_RADIUS,
            projectile_lookahead: Self::DEFAULT_PROJECTILE_LOOKAHEAD,
            push_minion_threshold: Self::DEFAULT_PUSH_MINION_THRESHOLD,
            critical_health: Self::DEFAULT_CRITICAL_HEALTH,
        }
    }
}

/// Immutable AI configuration for one agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub parameters: AiParameters,
}

impl AiConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            profile: DifficultyProfile::for_difficulty(difficulty),
            parameters: AiParameters::default(),
        }
    }

    /// Overrides the decision interval of the difficulty profile.
    pub fn with_decision_interval(mut self, interval_ms: u64) -> Self {
        self.profile.decision_interval_ms = interval_ms;
        self
    }

    pub fn with_parameters(mut self, parameters: AiParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Behavior knobs for this agent's difficulty tier.
    #[inline]
    pub fn difficulty_setting(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Looks up a named tuning value.
    #[inline]
    pub fn parameter(&self, parameter: AiParameter) -> f32 {
        self.parameters.get(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("EXPERT").unwrap(), Difficulty::Expert);
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
        assert!(Difficulty::from_str("nightmare").is_err());
    }

    #[test]
    fn harder_tiers_decide_more_often() {
        let easy = DifficultyProfile::for_difficulty(Difficulty::Easy);
        let expert = DifficultyProfile::for_difficulty(Difficulty::Expert);
        assert!(expert.decision_interval_ms < easy.decision_interval_ms);
        assert!(expert.dodge_probability > easy.dodge_probability);
    }

    #[test]
    fn parameter_lookup_reads_table() {
        let config = AiConfig::new(Difficulty::Normal);
        assert_eq!(
            config.parameter(AiParameter::TowerRange),
            AiParameters::DEFAULT_TOWER_RANGE
        );
        assert_eq!(
            AiParameter::from_str("push_minion_threshold").unwrap(),
            AiParameter::PushMinionThreshold
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ai_parameter_round_trips_with_serde() {
        let json = serde_json::to_string(&AiParameter::PushMinionThreshold).expect("serialize");
        assert_eq!(json, r#""PushMinionThreshold""#);
        let back: AiParameter = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, AiParameter::PushMinionThreshold);
    }
}
