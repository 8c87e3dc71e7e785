//! Per-tick hybrid decision orchestration.
//!
//! [`HybridEngine`] is the single entry point the simulation calls once per
//! agent per tick. It evaluates the situation, routes by urgency, optionally
//! consults the advisor in the background, and drives the agent's behavior
//! state machine.
//!
//! # Routing
//!
//! | Mode | Path |
//! |------|------|
//! | `EXTREME_URGENT` | forced local decision, aggressive posture; no cache, no advisor |
//! | `URGENT` | fresh cache entry if any, else balanced local decision + background query |
//! | `PLANNING` | balanced local decision + opportunistic background query |
//! | `LOCAL` | passive local decision |
//!
//! # Concurrency
//!
//! The tick never awaits. Advisor queries are spawned on the configured tokio
//! runtime and post a completion message on the agent's channel. The
//! completion is fused and cached at the start of the agent's next tick, so
//! the cache is only ever touched from the tick thread.

mod agent;
mod builder;
mod types;

pub use builder::HybridEngineBuilder;
pub use types::{Route, TickInput, TickOutcome};

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use behavior_fsm::{TransitionHistory, TransitionOutcome};
use game_core::{AiConfig, Difficulty, EntityId};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use self::agent::AgentBrain;
use self::types::AdvisorCompletion;
use crate::advisor::{ExternalAdvisor, build_prompt};
use crate::api::{Result, RuntimeError};
use crate::behavior::HeroBehavior;
use crate::cache::DecisionCache;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::decision::{Aggressiveness, Decision};
use crate::events::{AdvisorEvent, DecisionEvent, Event, EventBus, Topic};
use crate::evaluator::{Evaluation, UrgencyMode};
use crate::fusion;

/// Advisor plus the runtime its queries are spawned on.
pub(crate) struct AdvisorLink {
    advisor: Arc<ExternalAdvisor>,
    runtime: Handle,
}

/// Multi-agent hybrid decision engine.
pub struct HybridEngine {
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    cache: DecisionCache,
    advisor: Option<AdvisorLink>,
    events: EventBus,
    agents: HashMap<EntityId, AgentBrain>,
}

impl HybridEngine {
    /// Create a new engine builder
    pub fn builder() -> HybridEngineBuilder {
        HybridEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn advisor(&self) -> Option<&Arc<ExternalAdvisor>> {
        self.advisor.as_ref().map(|link| &link.advisor)
    }

    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to engine events on `topic`
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Registers an agent at `difficulty`.
    ///
    /// The engine's default tuning parameters are kept; a difficulty matching
    /// the engine default also keeps its decision-interval override.
    pub fn register_agent(&mut self, agent: EntityId, difficulty: Difficulty) -> Result<()> {
        let config = if difficulty == self.config.ai.difficulty {
            self.config.ai.clone()
        } else {
            AiConfig::new(difficulty).with_parameters(self.config.ai.parameters.clone())
        };
        self.register_agent_with(agent, config)
    }

    /// Registers an agent with explicit tuning.
    pub fn register_agent_with(&mut self, agent: EntityId, config: AiConfig) -> Result<()> {
        let seed = self.config.rng_seed.map(|seed| seed ^ u64::from(agent.0));

        match self.agents.entry(agent) {
            Entry::Occupied(_) => Err(RuntimeError::DuplicateAgent(agent)),
            Entry::Vacant(slot) => {
                slot.insert(AgentBrain::new(agent, config, seed));
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, agent: EntityId) -> bool {
        self.agents.contains_key(&agent)
    }

    /// Current behavior state of `agent`.
    pub fn current_state(&self, agent: EntityId) -> Result<HeroBehavior> {
        Ok(self.brain(agent)?.machine.current())
    }

    /// Recent behavior transitions of `agent`.
    pub fn state_history(&self, agent: EntityId) -> Result<&TransitionHistory<HeroBehavior>> {
        Ok(self.brain(agent)?.machine.history())
    }

    /// Decision applied on `agent`'s latest tick, if it has ticked.
    pub fn latest_decision(&self, agent: EntityId) -> Result<Option<&Decision>> {
        Ok(self.brain(agent)?.latest.as_ref())
    }

    /// Tuning lookups for `agent`.
    pub fn agent_config(&self, agent: EntityId) -> Result<&AiConfig> {
        Ok(&self.brain(agent)?.config)
    }

    fn brain(&self, agent: EntityId) -> Result<&AgentBrain> {
        self.agents
            .get(&agent)
            .ok_or(RuntimeError::UnknownAgent(agent))
    }

    /// Runs one decision tick for `agent`.
    ///
    /// # Errors
    ///
    /// Only [`RuntimeError::UnknownAgent`]. Every tick of a registered agent
    /// yields a decision.
    pub fn tick(&mut self, agent: EntityId, input: &TickInput) -> Result<TickOutcome> {
        let now = self.clock.now_ms();
        let brain = self
            .agents
            .get_mut(&agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;

        // 1. Fold in advisor replies that finished since the last tick.
        for completion in brain.drain_completions() {
            let local = brain.maker.decide(
                &input.world,
                Aggressiveness::Balanced,
                input.best_target,
                now,
                true,
            );
            let fused = fusion::merge(Some(&completion.response), &local, &completion.evaluation);

            tracing::debug!(
                agent = %agent,
                provider = %completion.response.provider,
                "cached fused decision: {}",
                fused
            );

            self.cache
                .update(agent, fused.clone(), &completion.evaluation, now);
            self.events.publish_decision(DecisionEvent::Cached {
                agent,
                at_ms: now,
                decision: fused,
            });
        }

        // 2. Evaluate.
        let evaluation = brain
            .evaluator
            .analyze(&input.hero, &input.game, &input.team, now);

        // 3. Route.
        let (decision, route) = match evaluation.mode {
            UrgencyMode::ExtremeUrgent => {
                let decision = brain.maker.decide(
                    &input.world,
                    Aggressiveness::Aggressive,
                    input.best_target,
                    now,
                    true,
                );
                (decision, Route::Reflex)
            }
            UrgencyMode::Urgent => match self.cache.lookup(agent, &evaluation, now) {
                Some(cached) => (cached.clone(), Route::CacheHit),
                None => {
                    let decision = brain.maker.decide(
                        &input.world,
                        Aggressiveness::Balanced,
                        input.best_target,
                        now,
                        false,
                    );
                    let launched = launch_query(
                        self.advisor.as_ref(),
                        &self.events,
                        brain,
                        agent,
                        input,
                        &evaluation,
                        now,
                    );
                    (decision, local_route(launched))
                }
            },
            UrgencyMode::Planning => {
                let decision = brain.maker.decide(
                    &input.world,
                    Aggressiveness::Balanced,
                    input.best_target,
                    now,
                    false,
                );
                let launched = launch_query(
                    self.advisor.as_ref(),
                    &self.events,
                    brain,
                    agent,
                    input,
                    &evaluation,
                    now,
                );
                (decision, local_route(launched))
            }
            UrgencyMode::Local => {
                let decision = brain.maker.decide(
                    &input.world,
                    Aggressiveness::Passive,
                    input.best_target,
                    now,
                    false,
                );
                (decision, Route::Passive)
            }
        };

        // 4. Drive the behavior state machine.
        let transition = match HeroBehavior::for_action(&decision.action) {
            Some(target) => {
                let outcome = brain.machine.set_state(target, now);
                if outcome.is_rejected() {
                    tracing::trace!(
                        agent = %agent,
                        from = %brain.machine.current(),
                        to = %target,
                        "transition rejected"
                    );
                }
                outcome
            }
            None => TransitionOutcome::Unchanged,
        };
        let state = brain.machine.current();

        // 5. Record and publish.
        brain.latest = Some(decision.clone());

        tracing::debug!(
            agent = %agent,
            mode = %evaluation.mode,
            score = evaluation.score,
            %route,
            %state,
            "tick: {}",
            decision
        );

        self.events.publish_decision(DecisionEvent::Applied {
            agent,
            at_ms: now,
            mode: evaluation.mode,
            score: evaluation.score,
            route,
            decision: decision.clone(),
            state,
            transition,
        });

        Ok(TickOutcome {
            evaluation,
            decision,
            route,
            state,
            transition,
        })
    }
}

fn local_route(launched: bool) -> Route {
    if launched {
        Route::AdvisorLaunched
    } else {
        Route::Local
    }
}

/// Spawns a background advisor query if the advisor is up and the agent's
/// cooldown allows it. Returns whether a query was launched.
fn launch_query(
    link: Option<&AdvisorLink>,
    events: &EventBus,
    brain: &AgentBrain,
    agent: EntityId,
    input: &TickInput,
    evaluation: &Evaluation,
    now: u64,
) -> bool {
    let Some(link) = link else {
        return false;
    };

    if !link.advisor.is_available() || !link.advisor.try_reserve(agent, now) {
        return false;
    }

    let prompt = build_prompt(&input.hero, &input.game, evaluation);
    let advisor = Arc::clone(&link.advisor);
    let completions = brain.completions_tx.clone();
    let bus = events.clone();
    let evaluation = evaluation.clone();

    events.publish_advisor(AdvisorEvent::Launched { agent, at_ms: now });
    tracing::debug!(agent = %agent, mode = %evaluation.mode, "advisor query launched");

    link.runtime.spawn(async move {
        let response = advisor.query(&prompt).await;

        // Queued before the event goes out: observers of `Completed` can rely
        // on the reply being folded in on the agent's next tick.
        // The agent may have been dropped with its receiver; nothing to do then.
        let _ = completions.send(AdvisorCompletion {
            evaluation,
            response: response.clone(),
        });

        bus.publish_advisor(AdvisorEvent::Completed { agent, response });
    });

    true
}
