//! Multi-layer situational evaluator.
//!
//! The evaluator turns one tick's snapshots into an [`Evaluation`]:
//!
//! 1. **Layer scoring** ([`layers`]): ten independent pure functions, each `[0, 100]`
//! 2. **Dynamic weighting** ([`weights`]): base table × difficulty × context factors
//! 3. **Aggregation**: weighted mean, clamped to `[0, 100]`
//! 4. **Classification**: [`UrgencyMode::classify`] on `(score, death probability)`
//! 5. **Confidence & rationale**: layer agreement and the top three layers
//! 6. **Post-process override**: near-certain death always escalates
//!
//! # Determinism
//!
//! Given the same snapshots, difficulty and timestamp, [`Evaluator::analyze`]
//! always produces the same evaluation.

pub mod layers;
pub mod types;
pub mod weights;

pub use layers::LayerInput;
pub use types::{Evaluation, Layer, LayerScores, UrgencyMode, Weights};

use game_core::{Difficulty, GameState, HeroState, TeamState};

/// Death probability above which the override forces extreme urgency.
pub const OVERRIDE_DEATH_PROBABILITY: f32 = 0.9;
/// Health percentage below which any enemy presence forces extreme urgency.
pub const OVERRIDE_HEALTH_PERCENT: f32 = 10.0;
/// Score floor applied by the override.
pub const OVERRIDE_SCORE_FLOOR: f64 = 90.0;

/// Stateless evaluator bound to a difficulty tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    difficulty: Difficulty,
}

impl Evaluator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Evaluates one tick for `hero`.
    ///
    /// # Arguments
    ///
    /// * `hero` - The controlled hero's snapshot
    /// * `game` - Nearby enemies/allies and situational flags
    /// * `team` - Aggregate ally summary
    /// * `now_ms` - Timestamp stamped onto the evaluation
    pub fn analyze(
        &self,
        hero: &HeroState,
        game: &GameState,
        team: &TeamState,
        now_ms: u64,
    ) -> Evaluation {
        let input = LayerInput { hero, game, team };
        let scores = LayerScores::from_fn(|layer| layers::score(layer, &input));
        let weights = weights::compute(self.difficulty, hero, game);

        let score = aggregate(&scores, &weights);
        let mode = UrgencyMode::classify(score, hero.death_probability);

        let evaluation = Evaluation {
            score,
            mode,
            scores,
            weights,
            confidence: confidence(&scores),
            rationale: rationale(&scores),
            timestamp_ms: now_ms,
            hero_id: hero.id,
        };

        let evaluation = apply_override(evaluation, hero, game);

        tracing::debug!(
            hero = %hero.id,
            score = evaluation.score,
            mode = %evaluation.mode,
            confidence = evaluation.confidence,
            "evaluated: {}",
            evaluation.rationale
        );

        evaluation
    }
}

/// Weighted mean of layer scores, clamped to `[0, 100]`.
pub fn aggregate(scores: &LayerScores, weights: &Weights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = Layer::ALL
        .iter()
        .map(|&layer| scores[layer] * weights[layer])
        .sum();

    (weighted / total).clamp(0.0, 100.0)
}

/// `max(0, 1 − stddev/50)` over the layer scores (population deviation).
pub fn confidence(scores: &LayerScores) -> f64 {
    let values = scores.values();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    (1.0 - variance.sqrt() / 50.0).max(0.0)
}

/// Top three layers by score as `name=value` pairs.
///
/// Ties keep declaration order, so the output is deterministic.
pub fn rationale(scores: &LayerScores) -> String {
    let mut ranked: Vec<(Layer, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .iter()
        .take(3)
        .map(|(layer, value)| format!("{layer}={value:.1}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escalates near-certain death regardless of the weighted computation.
fn apply_override(mut evaluation: Evaluation, hero: &HeroState, game: &GameState) -> Evaluation {
    let doomed = hero.death_probability > OVERRIDE_DEATH_PROBABILITY
        || (hero.health_percent < OVERRIDE_HEALTH_PERCENT && game.has_enemies());

    if doomed {
        evaluation.mode = UrgencyMode::ExtremeUrgent;
        evaluation.score = evaluation.score.max(OVERRIDE_SCORE_FLOOR);
    }

    evaluation
}
