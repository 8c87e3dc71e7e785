//! Core types for the situational evaluator.
//!
//! Layers, their scores and weights are fixed enum-indexed records. Iteration
//! over "all ten layers" goes through [`Layer::ALL`], never through reflection.

use std::ops::{Index, IndexMut};

use game_core::EntityId;

/// One independent situational scoring dimension.
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
pub enum Layer {
    /// Immediate risk of dying.
    Survival,
    /// Pressure from nearby enemies.
    Combat,
    /// Mana, cooldowns and spendable gold.
    Resource,
    /// Towers, objectives and wave control.
    Objective,
    /// Terrain, vision and mobility.
    Position,
    /// State of nearby teammates.
    Team,
    /// Readiness of the ability combo.
    Skills,
    /// Timing of recalls and rotations.
    Rotation,
    /// Streaks and economic swing.
    Momentum,
    /// Forecast threats and opportunities.
    Predictive,
}

impl Layer {
    pub const COUNT: usize = 10;

    /// All layers in declaration order.
    pub const ALL: [Layer; Self::COUNT] = [
        Layer::Survival,
        Layer::Combat,
        Layer::Resource,
        Layer::Objective,
        Layer::Position,
        Layer::Team,
        Layer::Skills,
        Layer::Rotation,
        Layer::Momentum,
        Layer::Predictive,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Score of each layer, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayerScores([f64; Layer::COUNT]);

impl LayerScores {
    /// Builds the record by evaluating `f` for every layer.
    pub fn from_fn(mut f: impl FnMut(Layer) -> f64) -> Self {
        let mut values = [0.0; Layer::COUNT];
        for layer in Layer::ALL {
            values[layer.index()] = f(layer);
        }
        Self(values)
    }

    /// `(layer, score)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, f64)> + '_ {
        Layer::ALL.into_iter().map(|layer| (layer, self[layer]))
    }

    pub fn values(&self) -> &[f64; Layer::COUNT] {
        &self.0
    }
}

impl Index<Layer> for LayerScores {
    type Output = f64;
    fn index(&self, layer: Layer) -> &f64 {
        &self.0[layer.index()]
    }
}

impl IndexMut<Layer> for LayerScores {
    fn index_mut(&mut self, layer: Layer) -> &mut f64 {
        &mut self.0[layer.index()]
    }
}

/// Strictly positive per-layer weights, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights([f64; Layer::COUNT]);

impl Weights {
    /// Base weight table every tick starts from.
    pub const BASE: Weights = Weights([
        0.30, // survival
        0.25, // combat
        0.15, // resource
        0.12, // objective
        0.12, // position
        0.10, // team
        0.08, // skills
        0.10, // rotation
        0.08, // momentum
        0.10, // predictive
    ]);

    /// Multiplies one layer's weight by `factor`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `factor` is not strictly positive, since that
    /// would break the positive-weight invariant.
    #[inline]
    pub fn scale(&mut self, layer: Layer, factor: f64) {
        debug_assert!(factor > 0.0, "weight factors must be positive");
        self.0[layer.index()] *= factor;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, f64)> + '_ {
        Layer::ALL.into_iter().map(|layer| (layer, self[layer]))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::BASE
    }
}

impl Index<Layer> for Weights {
    type Output = f64;
    fn index(&self, layer: Layer) -> &f64 {
        &self.0[layer.index()]
    }
}

/// Urgency classification that selects the routing policy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyMode {
    /// Nothing pressing; passive local play.
    Local,
    /// Worth thinking ahead; the advisor may be consulted in the background.
    Planning,
    /// Act now; cached advice is reused if still fresh.
    Urgent,
    /// Life-or-death; local reflexes only.
    ExtremeUrgent,
}

impl UrgencyMode {
    pub const EXTREME_THRESHOLD: f64 = 85.0;
    pub const URGENT_THRESHOLD: f64 = 70.0;
    pub const PLANNING_THRESHOLD: f64 = 40.0;
    pub const EXTREME_DEATH_PROBABILITY: f32 = 0.8;

    /// Classifies an aggregate score.
    ///
    /// A death probability above 0.8 escalates to [`UrgencyMode::ExtremeUrgent`]
    /// regardless of the score.
    pub fn classify(score: f64, death_probability: f32) -> Self {
        if score >= Self::EXTREME_THRESHOLD || death_probability > Self::EXTREME_DEATH_PROBABILITY
        {
            UrgencyMode::ExtremeUrgent
        } else if score >= Self::URGENT_THRESHOLD {
            UrgencyMode::Urgent
        } else if score >= Self::PLANNING_THRESHOLD {
            UrgencyMode::Planning
        } else {
            UrgencyMode::Local
        }
    }
}

/// Immutable result of evaluating one tick for one hero.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Aggregate urgency in `[0, 100]`.
    pub score: f64,
    pub mode: UrgencyMode,
    pub scores: LayerScores,
    pub weights: Weights,
    /// Agreement between layers in `[0, 1]`.
    pub confidence: f64,
    /// Top three layers, e.g. `survival=85.0, combat=60.0, predictive=50.0`.
    pub rationale: String,
    pub timestamp_ms: u64,
    pub hero_id: EntityId,
}

impl Evaluation {
    #[inline]
    pub fn layer(&self, layer: Layer) -> f64 {
        self.scores[layer]
    }
}
