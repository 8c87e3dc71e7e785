//! Layer scoring functions.
//!
//! Each function scores one situational dimension from the tick's snapshots and
//! returns a value in `[0, 100]`. Higher always means "more urgent". Functions
//! accumulate additive terms (some negative) and clamp once at the end.

use game_core::{AbilitySlot, GameState, HeroState, TeamState, WaveState};

use super::types::Layer;

/// Read-only inputs shared by every layer.
#[derive(Debug, Clone, Copy)]
pub struct LayerInput<'a> {
    pub hero: &'a HeroState,
    pub game: &'a GameState,
    pub team: &'a TeamState,
}

/// Scores `layer` for the given input.
pub fn score(layer: Layer, input: &LayerInput<'_>) -> f64 {
    let raw = match layer {
        Layer::Survival => survival(input),
        Layer::Combat => combat(input),
        Layer::Resource => resource(input),
        Layer::Objective => objective(input),
        Layer::Position => position(input),
        Layer::Team => team(input),
        Layer::Skills => skills(input),
        Layer::Rotation => rotation(input),
        Layer::Momentum => momentum(input),
        Layer::Predictive => predictive(input),
    };
    raw.clamp(0.0, 100.0)
}

// ============================================================================
// Layer Functions
// ============================================================================

/// Range within which enemy damage counts toward the 2-second projection.
pub const DAMAGE_PROJECTION_RANGE: f32 = 500.0;
/// Seconds of sustained enemy damage projected.
pub const DAMAGE_PROJECTION_SECONDS: f32 = 2.0;

/// Survival: how close the hero is to dying.
///
/// # Factors
///
/// - Health bands: <15 → +45, <25 → +30, <40 → +15
/// - Projected 2s damage from enemies within 500 exceeds current health → +30
/// - No escape route → +25
/// - CC-vulnerable → +20
pub fn survival(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let mut score = 0.0;

    score += if hero.health_percent < 15.0 {
        45.0
    } else if hero.health_percent < 25.0 {
        30.0
    } else if hero.health_percent < 40.0 {
        15.0
    } else {
        0.0
    };

    let projected: f32 = input
        .game
        .enemies_within(DAMAGE_PROJECTION_RANGE)
        .map(|enemy| enemy.attack_damage * DAMAGE_PROJECTION_SECONDS)
        .sum();
    if projected > hero.current_health {
        score += 30.0;
    }

    if !hero.has_escape_route {
        score += 25.0;
    }
    if hero.is_cc_vulnerable {
        score += 20.0;
    }

    score
}

/// Combat pressure: how outmatched the hero is right now.
pub fn combat(input: &LayerInput<'_>) -> f64 {
    let enemies = input.game.enemy_count();
    let allies = input.game.ally_count();
    let mut score = match enemies {
        n if n >= 4 => 40.0,
        3 => 30.0,
        2 => 15.0,
        _ => 0.0,
    };

    if enemies > allies + 1 {
        score += 25.0;
    }
    if allies == 0 && enemies > 0 {
        score += 20.0;
    }

    let cc_enemies = input.game.nearby_enemies.iter().filter(|e| e.has_cc).count();
    score += 10.0 * cc_enemies as f64;

    let hero = input.hero;
    if !hero.ability_ready(AbilitySlot::Primary) && !hero.ability_ready(AbilitySlot::Escape) {
        score += 20.0;
    }

    score
}

/// Gold at which an out-of-combat hero is considered able to shop.
pub const SPENDABLE_GOLD: u32 = 1500;

/// Resource: mana, item cooldowns and whether a recall would pay off.
pub fn resource(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let mut score = if hero.mana_percent < 15.0 {
        50.0
    } else if hero.mana_percent < 30.0 {
        30.0
    } else if hero.mana_percent < 50.0 {
        15.0
    } else {
        0.0
    };

    if hero.item_on_cooldown {
        score += 10.0;
    }
    if hero.gold >= SPENDABLE_GOLD && !hero.in_combat {
        score -= 20.0;
    }
    if hero.has_active_buff {
        score -= 15.0;
    }

    score
}

/// Objective: structures and wave state that demand attention.
pub fn objective(input: &LayerInput<'_>) -> f64 {
    let game = input.game;
    let mut score = 0.0;

    if game.tower_under_attack {
        score += 35.0;
    }
    if game.objective_threat {
        score += 30.0;
    }
    match game.wave_state {
        WaveState::Pushed => score += 15.0,
        WaveState::Frozen => score -= 10.0,
        WaveState::Even | WaveState::Pushing => {}
    }

    score
}

/// Position: terrain and vision disadvantages.
pub fn position(input: &LayerInput<'_>) -> f64 {
    let game = input.game;
    let mut score = 0.0;

    if !game.hero_on_high_ground && game.nearby_enemies.iter().any(|e| e.on_high_ground) {
        score += 25.0;
    }
    if !game.in_warded_area {
        score += 20.0;
    }
    if game.movement_restricted {
        score += 20.0;
    }
    if game.near_wall && game.nearby_enemies.iter().any(|e| e.has_wall_stun) {
        score += 25.0;
    }

    score
}

/// Ally health below which a teammate counts as weak.
pub const WEAK_ALLY_HEALTH: f32 = 30.0;
/// Team average health below which the team is considered worn down.
pub const LOW_TEAM_AVERAGE_HP: f32 = 40.0;

/// Team coordination: how much the team situation hurts the hero.
pub fn team(input: &LayerInput<'_>) -> f64 {
    let game = input.game;
    let mut score = 0.0;

    if game.team_fight_active && game.nearby_allies.is_empty() {
        score += 40.0;
    }

    let weak_allies = game
        .nearby_allies
        .iter()
        .filter(|ally| ally.health_percent < WEAK_ALLY_HEALTH)
        .count();
    score += 20.0 * weak_allies as f64;

    if game.teammate_critical {
        score += 25.0;
    }
    if input.team.average_hp < LOW_TEAM_AVERAGE_HP {
        score += 20.0;
    }

    score
}

/// Skill-combo readiness. A full combo against present enemies lowers urgency.
pub fn skills(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let enemies_present = input.game.has_enemies();
    let mut score = 0.0;

    if hero.combo_ready() && enemies_present {
        score -= 20.0;
    }
    if !hero.ability_ready(AbilitySlot::Ultimate) && input.game.enemy_count() >= 3 {
        score += 15.0;
    }
    if !hero.has_mana_for_combo {
        score += 12.0;
    }
    if !hero.ability_ready(AbilitySlot::Escape) && enemies_present {
        score += 20.0;
    }

    score
}

/// Rotation and timing: recall pressure and gank risk from missing enemies.
pub fn rotation(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let game = input.game;
    let mut score = 0.0;

    if hero.time_since_base > 180.0 {
        score += 20.0;
    } else if hero.time_since_base > 120.0 {
        score += 10.0;
    }

    if game.enemy_missing_duration > 15.0 {
        score += 30.0;
    } else if game.enemy_missing_duration > 8.0 {
        score += 18.0;
    }

    if game.good_rotation_window {
        score -= 15.0;
    }

    match game.wave_state {
        WaveState::Pushing => score += 12.0,
        WaveState::Frozen => score -= 5.0,
        WaveState::Even | WaveState::Pushed => {}
    }

    score
}

/// Gold deficit beyond which the team is considered to be losing economically.
pub const GOLD_DEFICIT_THRESHOLD: i32 = -2000;

/// Momentum: personal streaks and team swing.
pub fn momentum(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let game = input.game;
    let mut score = 0.0;

    if hero.death_streak >= 3 {
        score += 25.0;
    } else if hero.death_streak >= 2 {
        score += 15.0;
    }
    if hero.kill_streak >= 3 {
        score -= 10.0;
    }

    score += match game.score_differential.signum() {
        -1 => 10.0,
        1 => -10.0,
        _ => 0.0,
    };

    if game.gold_differential < GOLD_DEFICIT_THRESHOLD {
        score += 20.0;
    }

    score
}

/// Predictive: threats and openings the simulation forecasts.
pub fn predictive(input: &LayerInput<'_>) -> f64 {
    let hero = input.hero;
    let game = input.game;
    let mut score = 0.0;

    if game.incoming_cc_chain {
        score += 40.0;
    }
    if game.predicted_enemy_gank {
        score += 30.0;
    }
    if game.objective_contest_soon {
        score += 20.0;
    }
    if hero.death_probability > 0.7 {
        score += 50.0;
    }
    if game.kill_opportunity {
        score -= 20.0;
    }
    if hero.skills_ready_soon {
        score -= 10.0;
    }

    score
}
