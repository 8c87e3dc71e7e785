//! Per-tick dynamic weighting.
//!
//! Weights start from [`Weights::BASE`] every tick and are multiplied by
//! context factors. Nothing carries over between ticks.

use game_core::{Difficulty, GameState, HeroState};

use super::types::{Layer, Weights};

/// Health percentage below which survival weight doubles.
pub const LOW_HEALTH_WEIGHT_THRESHOLD: f32 = 30.0;

/// Computes this tick's weights.
pub fn compute(difficulty: Difficulty, hero: &HeroState, game: &GameState) -> Weights {
    let mut weights = Weights::BASE;

    apply_difficulty(&mut weights, difficulty);

    if game.team_fight_active {
        weights.scale(Layer::Team, 2.0);
        weights.scale(Layer::Position, 1.5);
    }

    if hero.health_percent < LOW_HEALTH_WEIGHT_THRESHOLD {
        weights.scale(Layer::Survival, 2.0);
    }

    if game.near_objective {
        weights.scale(Layer::Objective, 1.8);
    }

    weights
}

fn apply_difficulty(weights: &mut Weights, difficulty: Difficulty) {
    match difficulty {
        Difficulty::Easy => {
            weights.scale(Layer::Survival, 1.2);
            weights.scale(Layer::Predictive, 0.5);
            weights.scale(Layer::Skills, 0.8);
        }
        Difficulty::Normal => {}
        Difficulty::Hard => {
            weights.scale(Layer::Predictive, 1.2);
            weights.scale(Layer::Skills, 1.15);
        }
        Difficulty::Expert => {
            weights.scale(Layer::Predictive, 1.5);
            weights.scale(Layer::Skills, 1.3);
            weights.scale(Layer::Momentum, 0.8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normal_tier_in_calm_state_is_base_table() {
        let weights = compute(Difficulty::Normal, &HeroState::default(), &GameState::default());
        assert_eq!(weights, Weights::BASE);
    }

    #[test]
    fn expert_tier_favors_prediction() {
        let weights = compute(Difficulty::Expert, &HeroState::default(), &GameState::default());
        assert!(approx(weights[Layer::Predictive], 0.15));
        assert!(approx(weights[Layer::Skills], 0.104));
        assert!(approx(weights[Layer::Momentum], 0.064));
    }

    #[test]
    fn context_factors_stack() {
        let hero = HeroState::default().with_health(20.0, 120.0);
        let game = GameState {
            team_fight_active: true,
            near_objective: true,
            ..GameState::default()
        };

        let weights = compute(Difficulty::Normal, &hero, &game);
        assert!(approx(weights[Layer::Team], 0.20));
        assert!(approx(weights[Layer::Position], 0.18));
        assert!(approx(weights[Layer::Survival], 0.60));
        assert!(approx(weights[Layer::Objective], 0.216));
        assert!(weights.iter().all(|(_, w)| w > 0.0));
    }
}
