//! Prompt rendering for the advisor.

use std::fmt::Write;

use game_core::{GameState, HeroState};

use crate::decision::Action;
use crate::evaluator::Evaluation;

/// Renders the advisor prompt for one tick.
///
/// The prompt lists vitals, nearby counts, the evaluation summary and the
/// allowed actions, then asks for a single `ACTION | REASONING` line.
pub fn build_prompt(hero: &HeroState, game: &GameState, evaluation: &Evaluation) -> String {
    let mut prompt = String::with_capacity(512);

    // Writing into a String cannot fail.
    let _ = writeln!(
        prompt,
        "You are the tactical advisor for hero {} (level {}) in a lane-based arena game.",
        hero.id, hero.level
    );
    let _ = writeln!(
        prompt,
        "Health: {:.0}% ({:.0} hp). Mana: {:.0}%. Gold: {}.",
        hero.health_percent, hero.current_health, hero.mana_percent, hero.gold
    );
    let _ = writeln!(
        prompt,
        "Nearby enemies: {}. Nearby allies: {}. Kill differential: {:+}. Gold differential: {:+}.",
        game.enemy_count(),
        game.ally_count(),
        game.score_differential,
        game.gold_differential
    );

    let mut flags = Vec::new();
    if game.team_fight_active {
        flags.push("team fight in progress");
    }
    if game.tower_under_attack {
        flags.push("our tower is under attack");
    }
    if game.objective_contest_soon {
        flags.push("objective contest soon");
    }
    if game.kill_opportunity {
        flags.push("kill opportunity");
    }
    if game.predicted_enemy_gank {
        flags.push("gank predicted");
    }
    if !flags.is_empty() {
        let _ = writeln!(prompt, "Situation: {}.", flags.join(", "));
    }

    let _ = writeln!(
        prompt,
        "Urgency: {} (score {:.1}). Main concerns: {}.",
        evaluation.mode, evaluation.score, evaluation.rationale
    );
    let _ = writeln!(prompt, "Allowed actions: {}.", Action::VOCABULARY.join(", "));
    let _ = write!(
        prompt,
        "Reply with exactly one line in the format ACTION | REASONING"
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Evaluator;
    use game_core::{Difficulty, EnemySnapshot, EntityId, TeamState};

    #[test]
    fn prompt_mentions_state_and_format() {
        let hero = HeroState::default().with_health(42.0, 250.0);
        let game = GameState {
            nearby_enemies: vec![EnemySnapshot::new(EntityId(2), 400.0, 50.0)],
            team_fight_active: true,
            gold_differential: -1200,
            ..GameState::default()
        };
        let evaluation =
            Evaluator::new(Difficulty::Normal).analyze(&hero, &game, &TeamState::default(), 0);

        let prompt = build_prompt(&hero, &game, &evaluation);
        assert!(prompt.contains("Health: 42%"));
        assert!(prompt.contains("Nearby enemies: 1"));
        assert!(prompt.contains("Gold differential: -1200"));
        assert!(prompt.contains("team fight in progress"));
        assert!(prompt.contains("PUSH_OBJECTIVE"));
        assert!(prompt.ends_with("ACTION | REASONING"));
    }
}
