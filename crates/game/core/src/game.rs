//! Situational snapshots supplied by the simulation layer.
//!
//! [`GameState`] summarizes what is around the hero this tick (nearby enemies
//! and allies plus a set of situational flags). [`TeamState`] is the aggregate
//! ally summary.

use crate::common::EntityId;

/// An enemy hero near the agent, as seen this tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemySnapshot {
    pub id: EntityId,
    pub distance: f32,
    pub attack_damage: f32,
    /// Has a crowd-control ability available.
    pub has_cc: bool,
    /// Has a stun that triggers on terrain collision.
    pub has_wall_stun: bool,
    pub health_percent: f32,
    pub on_high_ground: bool,
}

impl EnemySnapshot {
    pub fn new(id: EntityId, distance: f32, attack_damage: f32) -> Self {
        Self {
            id,
            distance,
            attack_damage,
            health_percent: 100.0,
            ..Self::default()
        }
    }

    pub fn with_cc(mut self) -> Self {
        self.has_cc = true;
        self
    }

    pub fn with_health(mut self, health_percent: f32) -> Self {
        self.health_percent = health_percent;
        self
    }
}

/// An allied hero near the agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllySnapshot {
    pub id: EntityId,
    pub distance: f32,
    pub health_percent: f32,
}

impl AllySnapshot {
    pub fn new(id: EntityId, distance: f32, health_percent: f32) -> Self {
        Self {
            id,
            distance,
            health_percent,
        }
    }
}

/// Minion wave position in the agent's lane.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WaveState {
    /// Waves meet near the middle of the lane.
    #[default]
    Even,
    /// Our wave is pushing toward the enemy tower.
    Pushing,
    /// The enemy wave is crashing into our side.
    Pushed,
    /// Wave is held in place near our tower.
    Frozen,
}

/// Situational snapshot around the agent for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameState {
    pub nearby_enemies: Vec<EnemySnapshot>,
    pub nearby_allies: Vec<AllySnapshot>,
    /// Team kills minus enemy kills.
    pub score_differential: i32,
    /// Team gold minus enemy gold.
    pub gold_differential: i32,

    pub tower_under_attack: bool,
    pub objective_threat: bool,
    pub team_fight_active: bool,
    pub teammate_critical: bool,
    /// Seconds since any enemy hero was last seen.
    pub enemy_missing_duration: f32,
    pub good_rotation_window: bool,
    pub incoming_cc_chain: bool,
    pub predicted_enemy_gank: bool,
    pub objective_contest_soon: bool,
    pub kill_opportunity: bool,
    pub near_objective: bool,
    pub wave_state: WaveState,

    // ===== positional flags =====
    pub hero_on_high_ground: bool,
    pub in_warded_area: bool,
    pub movement_restricted: bool,
    pub near_wall: bool,
}

impl GameState {
    #[inline]
    pub fn enemy_count(&self) -> usize {
        self.nearby_enemies.len()
    }

    #[inline]
    pub fn ally_count(&self) -> usize {
        self.nearby_allies.len()
    }

    #[inline]
    pub fn has_enemies(&self) -> bool {
        !self.nearby_enemies.is_empty()
    }

    /// Enemies within `range` of the agent.
    pub fn enemies_within(&self, range: f32) -> impl Iterator<Item = &EnemySnapshot> {
        self.nearby_enemies
            .iter()
            .filter(move |enemy| enemy.distance <= range)
    }
}

/// Aggregate summary of the agent's team.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeamState {
    /// Mean health percentage across living teammates.
    pub average_hp: f32,
    pub alive_count: u32,
}

impl Default for TeamState {
    fn default() -> Self {
        Self {
            average_hp: 100.0,
            alive_count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemies_within_filters_by_distance() {
        let game = GameState {
            nearby_enemies: vec![
                EnemySnapshot::new(EntityId(1), 300.0, 50.0),
                EnemySnapshot::new(EntityId(2), 700.0, 50.0),
            ],
            ..GameState::default()
        };

        let close: Vec<_> = game.enemies_within(500.0).map(|e| e.id).collect();
        assert_eq!(close, vec![EntityId(1)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let game: GameState =
            serde_json::from_str(r#"{"team_fight_active": true, "wave_state": "Frozen"}"#)
                .expect("valid snapshot");
        assert!(game.team_fight_active);
        assert_eq!(game.wave_state, WaveState::Frozen);
        assert!(game.nearby_enemies.is_empty());
    }
}
