//! Read-only snapshot model shared by the decision runtime and its callers.
//!
//! `game-core` defines what the simulation hands to the AI each tick: the
//! controlled hero ([`HeroState`]), its surroundings ([`GameState`],
//! [`TeamState`]), the raw entity view used for situation analysis
//! ([`WorldView`]) and the immutable tuning tables ([`AiConfig`]). Nothing in
//! this crate performs I/O or mutates shared state.
pub mod common;
pub mod config;
pub mod game;
pub mod hero;
pub mod world;

pub use common::{EntityId, Team, Vec2, segment_intersects_circle};
pub use config::{AiConfig, AiParameter, AiParameters, Difficulty, DifficultyProfile};
pub use game::{AllySnapshot, EnemySnapshot, GameState, TeamState, WaveState};
pub use hero::{AbilitySlot, AbilityState, HeroState};
pub use world::{JungleCamp, Projectile, Tower, Unit, UnitKind, WorldView};
