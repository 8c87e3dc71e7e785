//! Difficulty-tiered strategy selection.
//!
//! Each tier is an ordered list of `(condition, action)` rules; the first rule
//! whose condition holds wins. Easy and Normal share the baseline policy. Hard
//! adds dodging and a separate attack rule, Expert adds recalls, jungling and
//! a safe-farm fallback.
//!
//! Random rolls are only taken when a rule's other conditions already hold, so
//! a seeded generator reproduces the same sequence for the same inputs.

use game_core::{AiConfig, Difficulty, EntityId};
use rand::Rng;

use super::{Action, Decision, Situation};

/// Expert recalls below this health percentage when nothing is around.
pub const BACK_HEALTH: f32 = 40.0;
/// Expert recalls below this mana percentage when nothing is around.
pub const BACK_MANA: f32 = 20.0;
/// Hard only commits to an all-in above this health percentage.
pub const HARD_ALL_IN_HEALTH: f32 = 50.0;

/// Selects an action for `situation` under `config`'s tier.
///
/// The returned decision carries its target already resolved through
/// [`acquire_target`].
pub fn select<R: Rng>(
    config: &AiConfig,
    situation: &Situation,
    best_target: Option<EntityId>,
    rng: &mut R,
) -> Decision {
    let (action, reasoning) = match config.difficulty {
        Difficulty::Easy | Difficulty::Normal => baseline(config, situation, rng),
        Difficulty::Hard => hard(config, situation, rng),
        Difficulty::Expert => expert(config, situation, rng),
    };

    let target = acquire_target(&action, situation, best_target);
    Decision::new(action, reasoning).with_target(target)
}

fn roll<R: Rng>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

fn can_harass<R: Rng>(config: &AiConfig, s: &Situation, rng: &mut R) -> bool {
    s.has_enemies() && !s.in_danger && roll(rng, config.profile.harass_probability)
}

fn can_push(config: &AiConfig, s: &Situation) -> bool {
    s.ally_minions.len() >= config.parameters.push_minion_threshold
}

fn baseline<R: Rng>(
    config: &AiConfig,
    s: &Situation,
    rng: &mut R,
) -> (Action, &'static str) {
    if s.should_retreat {
        (Action::Retreat, "Health low, falling back")
    } else if s.can_kill && s.has_advantage {
        (Action::AllIn, "Kill available with advantage")
    } else if can_harass(config, s, rng) {
        (Action::Harass, "Poking enemy from safety")
    } else if can_push(config, s) {
        (Action::PushObjective, "Minion wave ready to push")
    } else {
        (Action::Farm, "Farming lane")
    }
}

fn hard<R: Rng>(config: &AiConfig, s: &Situation, rng: &mut R) -> (Action, &'static str) {
    if s.has_projectiles() && roll(rng, config.profile.dodge_probability) {
        (Action::Dodge, "Skillshot incoming")
    } else if s.should_retreat {
        (Action::Retreat, "Health low, falling back")
    } else if s.can_kill && s.health_percent > HARD_ALL_IN_HEALTH {
        (Action::AllIn, "Kill available, health to spare")
    } else if s.has_advantage && s.has_enemies() {
        (Action::Attack, "Favorable fight")
    } else if can_harass(config, s, rng) {
        (Action::Harass, "Poking enemy from safety")
    } else if can_push(config, s) {
        (Action::PushObjective, "Minion wave ready to push")
    } else {
        (Action::Farm, "Farming lane")
    }
}

fn expert<R: Rng>(
    config: &AiConfig,
    s: &Situation,
    rng: &mut R,
) -> (Action, &'static str) {
    if s.has_projectiles() {
        (Action::Dodge, "Skillshot incoming")
    } else if s.should_retreat {
        (Action::Retreat, "Health low, falling back")
    } else if !s.has_enemies() && (s.health_percent < BACK_HEALTH || s.mana_percent < BACK_MANA) {
        (Action::Back, "Safe window to recall")
    } else if s.can_kill {
        (Action::AllIn, "Kill available")
    } else if s.has_advantage && s.has_enemies() {
        (Action::Attack, "Favorable fight")
    } else if can_push(config, s) && s.nearest_enemy_tower.is_some() {
        (Action::PushObjective, "Pushing wave into tower")
    } else if can_harass(config, s, rng) {
        (Action::Harass, "Poking enemy from safety")
    } else if !s.jungle_camps.is_empty() && s.enemy_minions.is_empty() {
        (Action::Jungle, "Clearing nearby camp")
    } else if s.in_danger {
        (Action::FarmSafe, "Farming under pressure")
    } else {
        (Action::Farm, "Farming lane")
    }
}

/// Picks the target for `action`.
///
/// Preference: lowest-health enemy hero in range, then the externally selected
/// best target, then the nearest enemy minion. Disengaging actions never carry
/// a target.
pub fn acquire_target(
    action: &Action,
    situation: &Situation,
    best_target: Option<EntityId>,
) -> Option<EntityId> {
    if action.is_disengage() {
        return None;
    }

    situation
        .weakest_enemy()
        .map(|enemy| enemy.id)
        .or(best_target)
        .or_else(|| situation.nearest_enemy_minion().map(|minion| minion.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::situation::{Contact, TowerContact};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn contact(id: u32, distance: f32, health_percent: f32) -> Contact {
        Contact {
            id: EntityId(id),
            distance,
            health_percent,
        }
    }

    fn decide(difficulty: Difficulty, s: &Situation) -> Decision {
        let mut rng = StdRng::seed_from_u64(7);
        select(&AiConfig::new(difficulty), s, None, &mut rng)
    }

    #[test]
    fn retreat_outranks_everything_in_baseline() {
        let s = Situation {
            should_retreat: true,
            can_kill: true,
            has_advantage: true,
            enemies: vec![contact(2, 300.0, 10.0)],
            ..Situation::default()
        };

        let decision = decide(Difficulty::Normal, &s);
        assert_eq!(decision.action, Action::Retreat);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn baseline_all_in_targets_weakest() {
        let s = Situation {
            can_kill: true,
            has_advantage: true,
            health_percent: 80.0,
            enemies: vec![contact(2, 200.0, 60.0), contact(3, 400.0, 15.0)],
            ..Situation::default()
        };

        let decision = decide(Difficulty::Easy, &s);
        assert_eq!(decision.action, Action::AllIn);
        assert_eq!(decision.target, Some(EntityId(3)));
    }

    #[test]
    fn baseline_pushes_with_enough_minions() {
        let s = Situation {
            health_percent: 90.0,
            ally_minions: (0..3).map(|i| contact(10 + i, 100.0, 100.0)).collect(),
            ..Situation::default()
        };
        assert_eq!(decide(Difficulty::Normal, &s).action, Action::PushObjective);
    }

    #[test]
    fn baseline_farms_by_default() {
        let s = Situation {
            health_percent: 90.0,
            enemy_minions: vec![contact(20, 300.0, 100.0)],
            ..Situation::default()
        };

        let decision = decide(Difficulty::Normal, &s);
        assert_eq!(decision.action, Action::Farm);
        assert_eq!(decision.target, Some(EntityId(20)));
    }

    #[test]
    fn harass_never_fires_in_danger() {
        let s = Situation {
            in_danger: true,
            health_percent: 90.0,
            enemies: vec![contact(2, 300.0, 100.0)],
            ..Situation::default()
        };

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = select(&AiConfig::new(Difficulty::Normal), &s, None, &mut rng);
            assert_ne!(decision.action, Action::Harass);
        }
    }

    #[test]
    fn harass_roll_is_seed_reproducible() {
        let s = Situation {
            health_percent: 90.0,
            enemies: vec![contact(2, 300.0, 100.0)],
            ..Situation::default()
        };
        let config = AiConfig::new(Difficulty::Normal);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| select(&config, &s, None, &mut rng).action)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn hard_all_in_needs_health() {
        let s = Situation {
            can_kill: true,
            health_percent: 45.0,
            enemies: vec![contact(2, 300.0, 20.0)],
            ..Situation::default()
        };
        assert_ne!(decide(Difficulty::Hard, &s).action, Action::AllIn);

        let healthy = Situation { health_percent: 60.0, ..s };
        assert_eq!(decide(Difficulty::Hard, &healthy).action, Action::AllIn);
    }

    #[test]
    fn hard_attacks_with_advantage() {
        let s = Situation {
            has_advantage: true,
            health_percent: 80.0,
            enemies: vec![contact(2, 300.0, 70.0)],
            ..Situation::default()
        };
        let decision = decide(Difficulty::Hard, &s);
        assert_eq!(decision.action, Action::Attack);
        assert_eq!(decision.target, Some(EntityId(2)));
    }

    #[test]
    fn expert_always_dodges() {
        let s = Situation {
            incoming_projectiles: 1,
            should_retreat: true,
            ..Situation::default()
        };
        let decision = decide(Difficulty::Expert, &s);
        assert_eq!(decision.action, Action::Dodge);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn expert_recalls_when_alone_and_low() {
        let s = Situation {
            health_percent: 35.0,
            mana_percent: 80.0,
            ..Situation::default()
        };
        assert_eq!(decide(Difficulty::Expert, &s).action, Action::Back);
    }

    #[test]
    fn expert_push_requires_known_tower() {
        let s = Situation {
            health_percent: 90.0,
            mana_percent: 90.0,
            ally_minions: (0..4).map(|i| contact(10 + i, 100.0, 100.0)).collect(),
            ..Situation::default()
        };
        assert_eq!(decide(Difficulty::Expert, &s).action, Action::Farm);

        let with_tower = Situation {
            nearest_enemy_tower: Some(TowerContact {
                id: EntityId(50),
                distance: 1200.0,
            }),
            ..s
        };
        assert_eq!(
            decide(Difficulty::Expert, &with_tower).action,
            Action::PushObjective
        );
    }

    #[test]
    fn expert_jungles_then_farms_safe() {
        let s = Situation {
            health_percent: 90.0,
            mana_percent: 90.0,
            jungle_camps: vec![EntityId(70)],
            ..Situation::default()
        };
        assert_eq!(decide(Difficulty::Expert, &s).action, Action::Jungle);

        let pressured = Situation {
            health_percent: 90.0,
            mana_percent: 90.0,
            in_danger: true,
            enemy_minions: vec![contact(20, 300.0, 100.0)],
            ..Situation::default()
        };
        assert_eq!(decide(Difficulty::Expert, &pressured).action, Action::FarmSafe);
    }

    #[test]
    fn target_falls_back_to_external_choice() {
        let s = Situation {
            enemy_minions: vec![contact(20, 300.0, 100.0)],
            ..Situation::default()
        };

        assert_eq!(
            acquire_target(&Action::Farm, &s, Some(EntityId(9))),
            Some(EntityId(9))
        );
        assert_eq!(acquire_target(&Action::Back, &s, Some(EntityId(9))), None);
        assert_eq!(acquire_target(&Action::Farm, &Situation::default(), None), None);
    }
}
