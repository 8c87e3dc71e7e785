//! World view → situation analysis.
//!
//! The [`SituationAnalyzer`] is the only code that looks at raw entities. It
//! filters by detection radius, finds the nearest structures, projects hostile
//! projectiles one lookahead ahead and derives the four booleans the strategy
//! tiers and behavior guards read.

use game_core::{
    AiConfig, AiParameters, EntityId, Team, Unit, Vec2, WorldView, segment_intersects_circle,
};

use super::Aggressiveness;

/// Health percentage below which an enemy hero counts as killable.
pub const KILLABLE_HEALTH: f32 = 30.0;
/// Own health percentage below which any enemy presence means danger.
pub const DANGER_HEALTH: f32 = 30.0;
/// Own health percentage under which danger alone triggers a retreat.
pub const RETREAT_IN_DANGER_HEALTH: f32 = 50.0;
/// Own health percentage above which numbers count as an advantage.
pub const ADVANTAGE_HEALTH: f32 = 50.0;

/// A nearby unit reduced to what the strategy needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub distance: f32,
    pub health_percent: f32,
}

impl Contact {
    fn from_unit(unit: &Unit, origin: Vec2) -> Self {
        Self {
            id: unit.id,
            distance: unit.position.distance(origin),
            health_percent: unit.health_percent(),
        }
    }
}

/// Nearest standing tower of one side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerContact {
    pub id: EntityId,
    pub distance: f32,
}

/// Everything the local strategy knows about the agent's surroundings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Situation {
    /// Enemy heroes within detection range, nearest first.
    pub enemies: Vec<Contact>,
    /// Allied heroes within detection range, nearest first. Excludes the agent.
    pub allies: Vec<Contact>,
    pub enemy_minions: Vec<Contact>,
    pub ally_minions: Vec<Contact>,
    pub health_percent: f32,
    pub mana_percent: f32,
    pub nearest_enemy_tower: Option<TowerContact>,
    pub nearest_ally_tower: Option<TowerContact>,
    pub distance_from_spawn: f32,
    /// Hostile projectiles whose path crosses the agent within the lookahead.
    pub incoming_projectiles: usize,
    /// Uncleared camps within range.
    pub jungle_camps: Vec<EntityId>,

    pub in_danger: bool,
    pub can_kill: bool,
    pub should_retreat: bool,
    pub has_advantage: bool,
}

impl Situation {
    #[inline]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    #[inline]
    pub fn ally_count(&self) -> usize {
        self.allies.len()
    }

    #[inline]
    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    #[inline]
    pub fn has_projectiles(&self) -> bool {
        self.incoming_projectiles > 0
    }

    /// Lowest-health enemy hero in range.
    pub fn weakest_enemy(&self) -> Option<&Contact> {
        self.enemies
            .iter()
            .min_by(|a, b| a.health_percent.total_cmp(&b.health_percent))
    }

    /// Nearest enemy minion in range.
    pub fn nearest_enemy_minion(&self) -> Option<&Contact> {
        self.enemy_minions.first()
    }
}

/// Builds [`Situation`]s with one agent's tuning.
#[derive(Clone, Debug)]
pub struct SituationAnalyzer {
    parameters: AiParameters,
    retreat_threshold: f32,
}

impl SituationAnalyzer {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            parameters: config.parameters.clone(),
            retreat_threshold: config.profile.retreat_health_threshold,
        }
    }

    pub fn parameters(&self) -> &AiParameters {
        &self.parameters
    }

    /// Analyzes the world around `world.agent`.
    pub fn analyze(&self, world: &WorldView) -> Situation {
        let agent = &world.agent;
        let origin = agent.position;
        let params = &self.parameters;

        let mut enemies = Vec::new();
        let mut allies = Vec::new();
        let mut enemy_minions = Vec::new();
        let mut ally_minions = Vec::new();

        for unit in world.units.iter().filter(|u| u.alive && u.id != agent.id) {
            let distance = unit.position.distance(origin);
            let hostile = unit.team != agent.team;

            let (bucket, radius) = match (unit.is_hero(), hostile) {
                (true, true) => (&mut enemies, params.enemy_detection_radius),
                (true, false) => (&mut allies, params.ally_detection_radius),
                (false, true) => (&mut enemy_minions, params.minion_detection_radius),
                (false, false) => (&mut ally_minions, params.minion_detection_radius),
            };

            if distance <= radius {
                bucket.push(Contact::from_unit(unit, origin));
            }
        }

        for bucket in [&mut enemies, &mut allies, &mut enemy_minions, &mut ally_minions] {
            bucket.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        let mut situation = Situation {
            enemies,
            allies,
            enemy_minions,
            ally_minions,
            health_percent: agent.health_percent(),
            mana_percent: agent.mana_percent(),
            nearest_enemy_tower: nearest_tower(world, agent.team.opponent(), origin),
            nearest_ally_tower: nearest_tower(world, agent.team, origin),
            distance_from_spawn: origin.distance(world.spawn),
            incoming_projectiles: self.incoming_projectiles(world),
            jungle_camps: world
                .jungle_camps
                .iter()
                .filter(|camp| !camp.cleared)
                .filter(|camp| camp.position.distance(origin) <= params.jungle_camp_radius)
                .map(|camp| camp.id)
                .collect(),
            ..Situation::default()
        };

        self.derive_flags(&mut situation);
        situation
    }

    /// Applies a posture override to an analyzed situation.
    ///
    /// Aggressive play always believes it has the advantage and only retreats
    /// below critical health. Passive play never believes it and also retreats
    /// whenever it is in danger.
    pub fn apply_posture(&self, mut situation: Situation, posture: Aggressiveness) -> Situation {
        match posture {
            Aggressiveness::Aggressive => {
                situation.has_advantage = true;
                situation.should_retreat = situation.health_percent < self.parameters.critical_health;
            }
            Aggressiveness::Passive => {
                situation.has_advantage = false;
                situation.should_retreat |= situation.in_danger;
            }
            Aggressiveness::Balanced => {}
        }
        situation
    }

    fn incoming_projectiles(&self, world: &WorldView) -> usize {
        let agent = &world.agent;
        let lookahead = self.parameters.projectile_lookahead;

        world
            .projectiles
            .iter()
            .filter(|p| p.owner_team != agent.team)
            .filter(|p| {
                let end = p.position + p.velocity * lookahead;
                segment_intersects_circle(
                    p.position,
                    end,
                    agent.position,
                    self.parameters.hero_radius + p.radius,
                )
            })
            .count()
    }

    fn derive_flags(&self, s: &mut Situation) {
        let enemies = s.enemy_count();
        let allies = s.ally_count();
        let health = s.health_percent;

        let under_enemy_tower = s
            .nearest_enemy_tower
            .is_some_and(|tower| tower.distance <= self.parameters.tower_range);

        s.in_danger = enemies > allies + 1
            || (under_enemy_tower && enemies > 0)
            || (health < DANGER_HEALTH && enemies > 0);

        s.can_kill = s
            .enemies
            .iter()
            .any(|e| e.health_percent < KILLABLE_HEALTH && health > e.health_percent);

        s.should_retreat = health < self.retreat_threshold
            || (s.in_danger && health < RETREAT_IN_DANGER_HEALTH);

        s.has_advantage =
            (allies + 1 > enemies && health > ADVANTAGE_HEALTH) || (enemies == 1 && s.can_kill);
    }
}

fn nearest_tower(world: &WorldView, team: Team, origin: Vec2) -> Option<TowerContact> {
    world
        .towers
        .iter()
        .filter(|tower| tower.alive && tower.team == team)
        .map(|tower| TowerContact {
            id: tower.id,
            distance: tower.position.distance(origin),
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
