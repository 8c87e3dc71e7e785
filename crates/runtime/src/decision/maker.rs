//! Rate-limited local decision maker.

use game_core::{AiConfig, EntityId, WorldView};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::situation::{Situation, SituationAnalyzer};
use super::{Aggressiveness, Decision, strategy};

/// Per-agent local strategy with its own dice and decision memory.
///
/// # Rate limiting
///
/// [`decide`](Self::decide) re-analyzes the world only when one of these holds:
///
/// - no decision has been made yet
/// - `force` is set
/// - the requested posture differs from the last analysis
/// - at least `decision_interval_ms` elapsed since the last analysis
///
/// Otherwise it returns the previous decision unchanged. A posture change
/// re-analyzes so a passive decision is never served to a balanced request.
pub struct DecisionMaker {
    config: AiConfig,
    analyzer: SituationAnalyzer,
    rng: StdRng,
    last: Option<Analysis>,
}

struct Analysis {
    decision: Decision,
    situation: Situation,
    posture: Aggressiveness,
    at_ms: u64,
}

impl DecisionMaker {
    /// Creates a maker for one agent.
    ///
    /// # Arguments
    ///
    /// * `config` - The agent's difficulty tier and tuning
    /// * `seed` - Fixed seed for strategy rolls; `None` seeds from the OS
    pub fn new(config: AiConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            analyzer: SituationAnalyzer::new(&config),
            config,
            rng,
            last: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// The most recent decision, if any.
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last.as_ref().map(|a| &a.decision)
    }

    /// The situation (posture applied) behind the most recent decision.
    pub fn last_situation(&self) -> Option<&Situation> {
        self.last.as_ref().map(|a| &a.situation)
    }

    /// Decides what to do now.
    ///
    /// # Arguments
    ///
    /// * `world` - Raw entities around the agent
    /// * `posture` - Override applied to the analyzed situation
    /// * `best_target` - Target picked by external targeting, used as a fallback
    /// * `now_ms` - Current clock reading
    /// * `force` - Bypass the decision interval
    pub fn decide(
        &mut self,
        world: &WorldView,
        posture: Aggressiveness,
        best_target: Option<EntityId>,
        now_ms: u64,
        force: bool,
    ) -> Decision {
        if !force && let Some(last) = &self.last {
            let elapsed = now_ms.saturating_sub(last.at_ms);
            if last.posture == posture && elapsed < self.config.profile.decision_interval_ms {
                return last.decision.clone();
            }
        }

        let situation = self
            .analyzer
            .apply_posture(self.analyzer.analyze(world), posture);
        let decision = strategy::select(&self.config, &situation, best_target, &mut self.rng);

        tracing::debug!(
            agent = %world.agent.id,
            %posture,
            enemies = situation.enemy_count(),
            allies = situation.ally_count(),
            health = situation.health_percent,
            "local decision: {}",
            decision
        );

        self.last = Some(Analysis {
            decision: decision.clone(),
            situation,
            posture,
            at_ms: now_ms,
        });

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Action;
    use game_core::{Difficulty, Team, Unit, Vec2};

    fn world(health: f32) -> WorldView {
        WorldView::new(
            Unit::hero(EntityId(1), Team::Blue, Vec2::ZERO).with_health(health, 600.0),
            Vec2::ZERO,
        )
    }

    fn maker() -> DecisionMaker {
        DecisionMaker::new(AiConfig::new(Difficulty::Normal), Some(1))
    }

    #[test]
    fn reuses_decision_inside_interval() {
        let mut maker = maker();
        let first = maker.decide(&world(600.0), Aggressiveness::Balanced, None, 0, false);
        assert_eq!(first.action, Action::Farm);

        // Health collapsed, but the 500 ms interval has not elapsed.
        let second = maker.decide(&world(30.0), Aggressiveness::Balanced, None, 499, false);
        assert_eq!(second, first);

        let third = maker.decide(&world(30.0), Aggressiveness::Balanced, None, 500, false);
        assert_eq!(third.action, Action::Retreat);
    }

    #[test]
    fn force_bypasses_interval() {
        let mut maker = maker();
        maker.decide(&world(600.0), Aggressiveness::Balanced, None, 0, false);

        let forced = maker.decide(&world(30.0), Aggressiveness::Balanced, None, 10, true);
        assert_eq!(forced.action, Action::Retreat);
    }

    #[test]
    fn posture_change_reanalyzes() {
        let mut maker = maker();
        maker.decide(&world(600.0), Aggressiveness::Passive, None, 0, false);

        let balanced = maker.decide(&world(30.0), Aggressiveness::Balanced, None, 10, false);
        assert_eq!(balanced.action, Action::Retreat);
        assert_eq!(maker.last_decision(), Some(&balanced));
    }

    #[test]
    fn seeded_makers_agree() {
        let enemy = Unit::hero(EntityId(2), Team::Red, Vec2::new(400.0, 0.0));
        let view = world(600.0).with_units([enemy]);

        let mut a = maker();
        let mut b = maker();
        for tick in 0..20 {
            let now = tick * 500;
            assert_eq!(
                a.decide(&view, Aggressiveness::Balanced, None, now, false),
                b.decide(&view, Aggressiveness::Balanced, None, now, false)
            );
        }
    }
}
