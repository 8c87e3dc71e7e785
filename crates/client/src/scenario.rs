//! Scripted snapshot sequences the client feeds through the engine.
//!
//! A [`Scenario`] lists agents, each with a sequence of [`Frame`]s. Frame `n`
//! is shown for `repeat` consecutive ticks; once the script runs out, the last
//! frame is held. Scenarios come from a JSON file or [`Scenario::skirmish`].

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use decision_runtime::TickInput;
use game_core::{
    AbilitySlot, AbilityState, AllySnapshot, Difficulty, EnemySnapshot, EntityId, GameState,
    HeroState, Team, TeamState, Tower, Unit, Vec2, WaveState, WorldView,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub agents: Vec<AgentScript>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentScript {
    pub id: EntityId,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub frames: Vec<Frame>,
}

/// One set of snapshots, shown for `repeat` ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub repeat: u32,
    pub hero: HeroState,
    pub game: GameState,
    pub team: TeamState,
    pub world: WorldView,
    pub best_target: Option<EntityId>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            repeat: 1,
            hero: HeroState::default(),
            game: GameState::default(),
            team: TeamState::default(),
            world: WorldView::default(),
            best_target: None,
        }
    }
}

impl Frame {
    pub fn input(&self) -> TickInput {
        TickInput::new(
            self.hero.clone(),
            self.game.clone(),
            self.team.clone(),
            self.world.clone(),
        )
        .with_best_target(self.best_target)
    }
}

impl AgentScript {
    /// Frame shown on `tick`, holding the last one past the end.
    pub fn frame(&self, tick: u32) -> Option<&Frame> {
        let mut remaining = tick;
        for frame in &self.frames {
            let span = frame.repeat.max(1);
            if remaining < span {
                return Some(frame);
            }
            remaining -= span;
        }
        self.frames.last()
    }

    /// Ticks until the last frame starts being held.
    pub fn length(&self) -> u32 {
        self.frames.iter().map(|frame| frame.repeat.max(1)).sum()
    }
}

impl Scenario {
    /// Loads and validates a JSON scenario file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON for [`Scenario`], or
    /// fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scenario: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text).context("Malformed scenario JSON")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Requires at least one agent, unique agent ids and at least one frame each.
    pub fn validate(&self) -> Result<()> {
        if self.agents.is_empty() {
            bail!("scenario '{}' has no agents", self.name);
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id) {
                bail!("agent {} appears twice", agent.id);
            }
            if agent.frames.is_empty() {
                bail!("agent {} has no frames", agent.id);
            }
        }

        Ok(())
    }

    /// Built-in two-hero lane skirmish.
    ///
    /// The blue hero farms, gets pressured, is collapsed on, nearly dies and
    /// recalls. The red hero farms, then finds the blue hero low and dives.
    pub fn skirmish() -> Self {
        Self {
            name: "skirmish".to_string(),
            agents: vec![
                AgentScript {
                    id: BLUE,
                    difficulty: Difficulty::Normal,
                    frames: vec![
                        blue_farming(),
                        blue_pressured(),
                        blue_collapsed_on(),
                        blue_near_death(),
                        blue_recalled(),
                    ],
                },
                AgentScript {
                    id: RED,
                    difficulty: Difficulty::Hard,
                    frames: vec![red_farming(), red_dive()],
                },
            ],
        }
    }
}

// ============================================================================
// Built-in skirmish
// ============================================================================

const BLUE: EntityId = EntityId(1);
const RED: EntityId = EntityId(2);
const BLUE_SPAWN: Vec2 = Vec2 { x: -4000.0, y: 0.0 };
const RED_SPAWN: Vec2 = Vec2 { x: 4000.0, y: 0.0 };

fn lane_minions(team: Team, first_id: u32, x: f32) -> Vec<Unit> {
    (0..3)
        .map(|i| Unit::minion(EntityId(first_id + i), team, Vec2::new(x, 40.0 * i as f32)))
        .collect()
}

fn blue_unit(health: f32) -> Unit {
    Unit::hero(BLUE, Team::Blue, Vec2::ZERO).with_health(health, 600.0)
}

fn blue_farming() -> Frame {
    Frame {
        repeat: 12,
        hero: HeroState::new(BLUE, Team::Blue, Vec2::ZERO),
        game: GameState {
            in_warded_area: true,
            ..GameState::default()
        },
        world: WorldView::new(blue_unit(600.0), BLUE_SPAWN)
            .with_units(lane_minions(Team::Blue, 100, -150.0))
            .with_units(lane_minions(Team::Red, 200, 350.0)),
        ..Frame::default()
    }
}

fn blue_pressured() -> Frame {
    let hero = HeroState {
        is_cc_vulnerable: true,
        time_since_base: 150.0,
        ..HeroState::new(BLUE, Team::Blue, Vec2::ZERO)
    }
    .with_health(60.0, 360.0)
    .with_mana(35.0);

    Frame {
        repeat: 12,
        hero,
        game: GameState {
            nearby_enemies: vec![EnemySnapshot::new(RED, 450.0, 65.0).with_cc()],
            enemy_missing_duration: 12.0,
            objective_contest_soon: true,
            predicted_enemy_gank: true,
            wave_state: WaveState::Pushed,
            ..GameState::default()
        },
        world: WorldView::new(blue_unit(360.0), BLUE_SPAWN)
            .with_units(lane_minions(Team::Red, 200, 300.0))
            .with_units([Unit::hero(RED, Team::Red, Vec2::new(450.0, 0.0))]),
        ..Frame::default()
    }
}

fn blue_collapsed_on() -> Frame {
    let hero = HeroState {
        has_escape_route: false,
        is_cc_vulnerable: true,
        has_mana_for_combo: false,
        item_on_cooldown: true,
        time_since_base: 200.0,
        death_streak: 2,
        ..HeroState::new(BLUE, Team::Blue, Vec2::ZERO)
    }
    .with_health(45.0, 270.0)
    .with_mana(10.0)
    .with_ability(AbilitySlot::Escape, AbilityState::on_cooldown(2, 8.0))
    .with_ability(AbilitySlot::Ultimate, AbilityState::on_cooldown(1, 40.0));

    let enemies = [RED, EntityId(3), EntityId(4)];

    Frame {
        repeat: 10,
        hero,
        game: GameState {
            nearby_enemies: enemies
                .iter()
                .map(|&id| EnemySnapshot::new(id, 320.0, 60.0).with_cc())
                .collect(),
            nearby_allies: vec![AllySnapshot::new(EntityId(5), 1200.0, 25.0)],
            score_differential: -2,
            gold_differential: -2500,
            tower_under_attack: true,
            teammate_critical: true,
            incoming_cc_chain: true,
            predicted_enemy_gank: true,
            movement_restricted: true,
            ..GameState::default()
        },
        team: TeamState {
            average_hp: 35.0,
            alive_count: 4,
        },
        world: WorldView::new(blue_unit(270.0), BLUE_SPAWN).with_units(
            enemies
                .iter()
                .map(|&id| Unit::hero(id, Team::Red, Vec2::new(320.0, 0.0))),
        ),
        best_target: Some(RED),
    }
}

fn blue_near_death() -> Frame {
    Frame {
        repeat: 6,
        hero: HeroState::new(BLUE, Team::Blue, Vec2::new(-600.0, 0.0))
            .with_health(8.0, 48.0)
            .with_death_probability(0.85),
        game: GameState {
            nearby_enemies: vec![EnemySnapshot::new(RED, 280.0, 70.0)],
            ..GameState::default()
        },
        world: WorldView::new(
            Unit::hero(BLUE, Team::Blue, Vec2::new(-600.0, 0.0)).with_health(48.0, 600.0),
            BLUE_SPAWN,
        )
        .with_units([Unit::hero(RED, Team::Red, Vec2::new(-320.0, 0.0))]),
        ..Frame::default()
    }
}

fn blue_recalled() -> Frame {
    Frame {
        repeat: 1,
        hero: HeroState::new(BLUE, Team::Blue, BLUE_SPAWN).with_mana(90.0),
        game: GameState {
            in_warded_area: true,
            ..GameState::default()
        },
        world: WorldView::new(Unit::hero(BLUE, Team::Blue, BLUE_SPAWN), BLUE_SPAWN),
        ..Frame::default()
    }
}

fn red_unit(position: Vec2, health: f32) -> Unit {
    Unit::hero(RED, Team::Red, position).with_health(health, 600.0)
}

fn red_farming() -> Frame {
    Frame {
        repeat: 24,
        hero: HeroState::new(RED, Team::Red, Vec2::new(450.0, 0.0)),
        game: GameState {
            in_warded_area: true,
            ..GameState::default()
        },
        world: WorldView::new(red_unit(Vec2::new(450.0, 0.0), 600.0), RED_SPAWN)
            .with_units(lane_minions(Team::Red, 200, 300.0))
            .with_units(lane_minions(Team::Blue, 100, -150.0)),
        ..Frame::default()
    }
}

fn red_dive() -> Frame {
    let position = Vec2::new(-320.0, 0.0);

    Frame {
        repeat: 1,
        hero: HeroState {
            kill_streak: 3,
            ..HeroState::new(RED, Team::Red, position)
        }
        .with_health(70.0, 420.0),
        game: GameState {
            nearby_enemies: vec![EnemySnapshot::new(BLUE, 280.0, 55.0).with_health(8.0)],
            kill_opportunity: true,
            wave_state: WaveState::Pushing,
            ..GameState::default()
        },
        world: WorldView::new(red_unit(position, 420.0), RED_SPAWN)
            .with_units([blue_unit(48.0)])
            // Diving under the blue tower.
            .with_towers([Tower {
                id: EntityId(900),
                team: Team::Blue,
                position: Vec2::new(-900.0, 0.0),
                alive: true,
            }]),
        best_target: Some(BLUE),
        ..Frame::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_repeat_then_hold() {
        let script = AgentScript {
            id: EntityId(1),
            difficulty: Difficulty::Normal,
            frames: vec![
                Frame {
                    repeat: 2,
                    best_target: Some(EntityId(10)),
                    ..Frame::default()
                },
                Frame {
                    repeat: 1,
                    best_target: Some(EntityId(20)),
                    ..Frame::default()
                },
            ],
        };

        let target = |tick| script.frame(tick).and_then(|f| f.best_target);
        assert_eq!(target(0), Some(EntityId(10)));
        assert_eq!(target(1), Some(EntityId(10)));
        assert_eq!(target(2), Some(EntityId(20)));
        assert_eq!(target(50), Some(EntityId(20)));
        assert_eq!(script.length(), 3);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "duel",
                "agents": [
                    { "id": 7, "difficulty": "Expert", "frames": [ { "repeat": 3 } ] }
                ]
            }"#,
        )
        .expect("scenario should parse");

        let agent = &scenario.agents[0];
        assert_eq!(agent.id, EntityId(7));
        assert_eq!(agent.difficulty, Difficulty::Expert);
        assert_eq!(agent.frames[0].repeat, 3);
        assert_eq!(agent.frames[0].hero.health_percent, 100.0);
    }

    #[test]
    fn rejects_duplicate_agents() {
        let err = Scenario::from_json(
            r#"{ "name": "dup", "agents": [
                { "id": 1, "frames": [{}] },
                { "id": 1, "frames": [{}] }
            ] }"#,
        )
        .expect_err("duplicate ids must fail");
        assert!(format!("{err:#}").contains("appears twice"));
    }

    #[test]
    fn rejects_empty_frames() {
        assert!(Scenario::from_json(r#"{ "name": "x", "agents": [{ "id": 1, "frames": [] }] }"#).is_err());
        assert!(Scenario::from_json(r#"{ "name": "x", "agents": [] }"#).is_err());
    }

    #[test]
    fn skirmish_survives_a_json_round_trip() {
        let skirmish = Scenario::skirmish();
        skirmish.validate().expect("built-in scenario is valid");

        let json = serde_json::to_string(&skirmish).expect("serialize");
        assert_eq!(Scenario::from_json(&json).expect("reload"), skirmish);
    }
}
