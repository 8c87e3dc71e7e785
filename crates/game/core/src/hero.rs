//! Per-tick snapshot of the controlled hero.
//!
//! [`HeroState`] is rebuilt by the simulation layer every tick from live entity
//! state. The decision runtime only ever reads it.

use crate::common::{EntityId, Team, Vec2};

/// Fixed ability slots every hero carries.
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
pub enum AbilitySlot {
    /// Main damage ability.
    Primary,
    /// Secondary damage or utility ability.
    Secondary,
    /// Dash, blink or other disengage.
    Escape,
    /// Long-cooldown ultimate.
    Ultimate,
}

impl AbilitySlot {
    pub const COUNT: usize = 4;

    pub const ALL: [AbilitySlot; Self::COUNT] = [
        AbilitySlot::Primary,
        AbilitySlot::Secondary,
        AbilitySlot::Escape,
        AbilitySlot::Ultimate,
    ];

    /// Slots that make up the hero's burst combo.
    pub const COMBO: [AbilitySlot; 3] = [
        AbilitySlot::Primary,
        AbilitySlot::Secondary,
        AbilitySlot::Ultimate,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Cooldown state of a single ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityState {
    pub level: u8,
    /// Seconds until the ability can be cast again.
    pub cooldown_remaining: f32,
    pub ready: bool,
}

impl AbilityState {
    pub const fn ready(level: u8) -> Self {
        Self {
            level,
            cooldown_remaining: 0.0,
            ready: true,
        }
    }

    pub const fn on_cooldown(level: u8, cooldown_remaining: f32) -> Self {
        Self {
            level,
            cooldown_remaining,
            ready: false,
        }
    }
}

impl Default for AbilityState {
    fn default() -> Self {
        Self::ready(1)
    }
}

/// Snapshot of the hero being driven by the decision engine.
///
/// Percentages are expressed in `0..=100`. The predictive fields are derived
/// by the simulation layer (damage projections, escape analysis) and consumed
/// verbatim by the evaluator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroState {
    pub id: EntityId,
    pub team: Team,
    pub level: u32,
    pub health_percent: f32,
    pub mana_percent: f32,
    /// Absolute hit points, used for incoming-damage projections.
    pub current_health: f32,
    pub position: Vec2,
    pub abilities: [AbilityState; AbilitySlot::COUNT],
    pub gold: u32,
    pub in_combat: bool,
    /// An active item (potion, shield, ...) is currently on cooldown.
    pub item_on_cooldown: bool,
    pub has_active_buff: bool,

    // ===== predictive flags =====
    pub death_probability: f32,
    pub has_escape_route: bool,
    pub is_cc_vulnerable: bool,
    pub has_mana_for_combo: bool,
    pub skills_ready_soon: bool,
    /// Seconds since the hero last visited the fountain.
    pub time_since_base: f32,
    pub kill_streak: u32,
    pub death_streak: u32,
}

impl HeroState {
    /// Creates a healthy, full-resource hero at `position`.
    pub fn new(id: EntityId, team: Team, position: Vec2) -> Self {
        Self {
            id,
            team,
            position,
            ..Self::default()
        }
    }

    #[inline]
    pub fn ability(&self, slot: AbilitySlot) -> &AbilityState {
        &self.abilities[slot.index()]
    }

    #[inline]
    pub fn ability_ready(&self, slot: AbilitySlot) -> bool {
        self.ability(slot).ready
    }

    /// Returns true if every combo ability is ready to cast.
    pub fn combo_ready(&self) -> bool {
        AbilitySlot::COMBO
            .iter()
            .all(|&slot| self.ability_ready(slot))
    }

    pub fn with_health(mut self, health_percent: f32, current_health: f32) -> Self {
        self.health_percent = health_percent;
        self.current_health = current_health;
        self
    }

    pub fn with_mana(mut self, mana_percent: f32) -> Self {
        self.mana_percent = mana_percent;
        self
    }

    pub fn with_death_probability(mut self, death_probability: f32) -> Self {
        self.death_probability = death_probability;
        self
    }

    pub fn with_ability(mut self, slot: AbilitySlot, state: AbilityState) -> Self {
        self.abilities[slot.index()] = state;
        self
    }
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            id: EntityId::default(),
            team: Team::default(),
            level: 1,
            health_percent: 100.0,
            mana_percent: 100.0,
            current_health: 600.0,
            position: Vec2::ZERO,
            abilities: [AbilityState::default(); AbilitySlot::COUNT],
            gold: 0,
            in_combat: false,
            item_on_cooldown: false,
            has_active_buff: false,
            death_probability: 0.0,
            has_escape_route: true,
            is_cc_vulnerable: false,
            has_mana_for_combo: true,
            skills_ready_soon: false,
            time_since_base: 0.0,
            kill_streak: 0,
            death_streak: 0,
        }
    }
}
