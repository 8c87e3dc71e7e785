//! Arena client: drives scripted heroes through the hybrid decision engine.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ HybridEngine (decision runtime, owns every agent)
//!   ├─→ Scenario (scripted snapshots per agent)
//!   └─→ Background workers
//!         ├─→ advisor availability probe
//!         └─→ event logger (decision + advisor topics)
//! ```
//!
//! The tick loop runs on the caller's task. Workers are aborted when the run
//! ends, whether it finished or was interrupted.

mod builder;
pub mod config;
pub mod logging;
pub mod scenario;

pub use builder::ClientBuilder;
pub use config::ArenaConfig;
pub use scenario::{AgentScript, Frame, Scenario};

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use decision_runtime::{
    AdvisorEvent, DecisionEvent, Event, HybridEngine, Route, TickOutcome, Topic,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Engine plus the scenario it plays.
pub struct Client {
    engine: HybridEngine,
    scenario: Scenario,
    tick_interval: Duration,
    ticks: u32,
}

/// Route counts and final decisions of a finished run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u32,
    pub routes: BTreeMap<String, u32>,
    pub interrupted: bool,
}

impl RunSummary {
    fn record(&mut self, route: Route) {
        *self.routes.entry(route.to_string()).or_default() += 1;
    }

    pub fn count(&self, route: Route) -> u32 {
        self.routes.get(route.as_ref()).copied().unwrap_or_default()
    }
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn engine(&self) -> &HybridEngine {
        &self.engine
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Registers the scenario's agents, then ticks every agent once per
    /// interval until the tick budget is spent or Ctrl-C arrives.
    ///
    /// # Errors
    ///
    /// Fails if an agent cannot be registered or a tick is rejected.
    pub async fn run(mut self) -> Result<RunSummary> {
        for agent in &self.scenario.agents {
            self.engine
                .register_agent(agent.id, agent.difficulty)
                .with_context(|| format!("Failed to register agent {}", agent.id))?;
        }

        let probe_task = self.engine.advisor().map(|advisor| advisor.spawn_probe_loop());
        let logger_task = spawn_event_logger(
            self.engine.subscribe(Topic::Decision),
            self.engine.subscribe(Topic::Advisor),
        );

        tracing::info!(
            scenario = %self.scenario.name,
            agents = self.scenario.agents.len(),
            ticks = self.ticks,
            "Arena run starting"
        );

        let result = self.tick_loop().await;

        if let Some(task) = probe_task {
            task.abort();
            let _ = task.await;
        }
        logger_task.abort();
        let _ = logger_task.await;

        let summary = result?;
        tracing::info!(
            ticks = summary.ticks,
            interrupted = summary.interrupted,
            "Arena run finished: {:?}",
            summary.routes
        );
        Ok(summary)
    }

    async fn tick_loop(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        for tick in 0..self.ticks {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut shutdown => {
                    tracing::info!(tick, "Interrupted");
                    summary.interrupted = true;
                    break;
                }
            }

            for agent in &self.scenario.agents {
                let Some(frame) = agent.frame(tick) else {
                    continue;
                };
                let outcome = self
                    .engine
                    .tick(agent.id, &frame.input())
                    .with_context(|| format!("Tick {} failed for agent {}", tick, agent.id))?;

                log_outcome(tick, agent, &outcome);
                summary.record(outcome.route);
            }

            summary.ticks += 1;
        }

        Ok(summary)
    }
}

fn log_outcome(tick: u32, agent: &AgentScript, outcome: &TickOutcome) {
    tracing::info!(
        tick,
        agent = %agent.id,
        mode = %outcome.evaluation.mode,
        score = format_args!("{:.1}", outcome.evaluation.score),
        route = %outcome.route,
        state = %outcome.state,
        "{}",
        outcome.decision
    );
    tracing::debug!(agent = %agent.id, "layers: {}", outcome.evaluation.rationale);
}

/// Background worker that mirrors engine events into the log.
fn spawn_event_logger(
    mut decisions: broadcast::Receiver<Event>,
    mut advisor: broadcast::Receiver<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                event = decisions.recv() => event,
                event = advisor.recv() => event,
            };

            match received {
                Ok(event) => log_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: &Event) {
    match event {
        Event::Decision(decision) => match decision.as_ref() {
            DecisionEvent::Applied {
                agent,
                transition,
                state,
                ..
            } if transition.is_transitioned() => {
                tracing::info!(agent = %agent, %state, "Behavior changed");
            }
            DecisionEvent::Applied { .. } => {}
            DecisionEvent::Cached {
                agent, decision, ..
            } => {
                tracing::debug!(agent = %agent, "Advisor decision cached: {}", decision);
            }
        },
        Event::Advisor(advisor) => match advisor {
            AdvisorEvent::Launched { agent, at_ms } => {
                tracing::debug!(agent = %agent, at_ms, "Advisor query launched");
            }
            AdvisorEvent::Completed { agent, response } => {
                tracing::info!(
                    agent = %agent,
                    provider = %response.provider,
                    latency_ms = response.latency_ms,
                    confidence = response.confidence,
                    "Advisor replied {}: {}",
                    response.decision,
                    response.reasoning
                );
            }
            AdvisorEvent::AvailabilityChanged { available } => {
                tracing::info!(available, "Advisor availability changed");
            }
        },
    }
}
