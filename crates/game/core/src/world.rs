//! Raw world entities around an agent.
//!
//! The situation analyzer in the decision runtime turns a [`WorldView`] into
//! counts, nearest structures and danger flags. Nothing here is derived; it is
//! exactly what the simulation exposes for the tick.

use crate::common::{EntityId, Team, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    #[default]
    Hero,
    Minion,
}

/// A living or dead combat unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Unit {
    pub id: EntityId,
    pub kind: UnitKind,
    pub team: Team,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub attack_damage: f32,
    pub alive: bool,
}

impl Unit {
    pub fn hero(id: EntityId, team: Team, position: Vec2) -> Self {
        Self {
            id,
            kind: UnitKind::Hero,
            team,
            position,
            ..Self::default()
        }
    }

    pub fn minion(id: EntityId, team: Team, position: Vec2) -> Self {
        Self {
            id,
            kind: UnitKind::Minion,
            team,
            position,
            health: 300.0,
            max_health: 300.0,
            mana: 0.0,
            max_mana: 0.0,
            attack_damage: 12.0,
            ..Self::default()
        }
    }

    pub fn with_health(mut self, health: f32, max_health: f32) -> Self {
        self.health = health;
        self.max_health = max_health;
        self
    }

    pub fn with_mana(mut self, mana: f32, max_mana: f32) -> Self {
        self.mana = mana;
        self.max_mana = max_mana;
        self
    }

    #[inline]
    pub fn is_hero(&self) -> bool {
        self.kind == UnitKind::Hero
    }

    /// Health as a percentage of maximum, `0` for units without a pool.
    pub fn health_percent(&self) -> f32 {
        percent(self.health, self.max_health)
    }

    pub fn mana_percent(&self) -> f32 {
        percent(self.mana, self.max_mana)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            kind: UnitKind::Hero,
            team: Team::default(),
            position: Vec2::ZERO,
            health: 600.0,
            max_health: 600.0,
            mana: 300.0,
            max_mana: 300.0,
            attack_damage: 60.0,
            alive: true,
        }
    }
}

fn percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

/// A projectile in flight.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Projectile {
    pub owner_team: Team,
    pub position: Vec2,
    /// World units per second.
    pub velocity: Vec2,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tower {
    pub id: EntityId,
    pub team: Team,
    pub position: Vec2,
    pub alive: bool,
}

impl Default for Tower {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            team: Team::default(),
            position: Vec2::ZERO,
            alive: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JungleCamp {
    pub id: EntityId,
    pub position: Vec2,
    pub cleared: bool,
}

/// Everything the analyzer may look at for one agent on one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldView {
    /// The controlled hero's own unit.
    pub agent: Unit,
    /// All other units (heroes and minions, both teams).
    pub units: Vec<Unit>,
    pub projectiles: Vec<Projectile>,
    pub towers: Vec<Tower>,
    pub jungle_camps: Vec<JungleCamp>,
    /// The agent's fountain position.
    pub spawn: Vec2,
}

impl WorldView {
    pub fn new(agent: Unit, spawn: Vec2) -> Self {
        Self {
            agent,
            spawn,
            ..Self::default()
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_projectiles(mut self, projectiles: impl IntoIterator<Item = Projectile>) -> Self {
        self.projectiles.extend(projectiles);
        self
    }

    pub fn with_towers(mut self, towers: impl IntoIterator<Item = Tower>) -> Self {
        self.towers.extend(towers);
        self
    }

    pub fn with_jungle_camps(mut self, camps: impl IntoIterator<Item = JungleCamp>) -> Self {
        self.jungle_camps.extend(camps);
        self
    }
}
