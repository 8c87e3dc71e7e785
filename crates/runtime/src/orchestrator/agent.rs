//! Per-agent engine state.

use game_core::{AiConfig, EntityId};
use tokio::sync::mpsc;

use super::types::AdvisorCompletion;
use crate::behavior::{self, HeroStateMachine};
use crate::decision::{Decision, DecisionMaker};
use crate::evaluator::Evaluator;

/// Everything the engine keeps for one registered agent.
pub(crate) struct AgentBrain {
    pub config: AiConfig,
    pub evaluator: Evaluator,
    pub machine: HeroStateMachine,
    pub maker: DecisionMaker,
    pub latest: Option<Decision>,
    pub completions_tx: mpsc::UnboundedSender<AdvisorCompletion>,
    completions_rx: mpsc::UnboundedReceiver<AdvisorCompletion>,
}

impl AgentBrain {
    pub fn new(id: EntityId, config: AiConfig, seed: Option<u64>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        tracing::debug!(agent = %id, difficulty = %config.difficulty, "agent registered");

        Self {
            evaluator: Evaluator::new(config.difficulty),
            machine: behavior::hero_machine(&config.parameters),
            maker: DecisionMaker::new(config.clone(), seed),
            config,
            latest: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Takes every completion that arrived since the last tick.
    pub fn drain_completions(&mut self) -> Vec<AdvisorCompletion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            completions.push(completion);
        }
        completions
    }
}
