//! Approximate-match decision cache.
//!
//! One live entry per agent. An entry is reusable while the situation has
//! barely moved: same urgency mode, aggregate score within
//! [`SCORE_TOLERANCE`] and younger than [`MAX_AGE_MS`]. The bucketed key
//! string is kept for diagnostics only; lookups go by agent id.

use std::collections::{HashMap, VecDeque};

use game_core::EntityId;

use crate::decision::Decision;
use crate::evaluator::{Evaluation, Layer, UrgencyMode};

/// Maximum number of agents with a live entry.
pub const CAPACITY: usize = 50;
/// Entries at or beyond this age are stale.
pub const MAX_AGE_MS: u64 = 100;
/// Largest score drift at which an entry is still reusable.
pub const SCORE_TOLERANCE: f64 = 5.0;

const KEY_SCORE_BUCKET: f64 = 5.0;
const KEY_LAYER_THRESHOLD: f64 = 50.0;
const KEY_TEAM_FIGHT_WEIGHT: f64 = 0.15;

#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub decision: Decision,
    pub evaluation: Evaluation,
    pub score: f64,
    pub mode: UrgencyMode,
    pub timestamp_ms: u64,
    pub key: String,
}

/// Bounded per-agent cache, evicting by insertion order.
#[derive(Debug, Default)]
pub struct DecisionCache {
    entries: HashMap<EntityId, CacheEntry>,
    order: VecDeque<EntityId>,
}

impl DecisionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, agent: EntityId) -> Option<&CacheEntry> {
        self.entries.get(&agent)
    }

    /// Diagnostic bucket key, e.g. `URGENT:14:hi:good:solo`.
    ///
    /// Segments: mode, `floor(score / 5)`, combat `hi|lo`, position
    /// `bad|good` (both split at 50), and `tf|solo` by team weight above 0.15.
    pub fn generate_key(evaluation: &Evaluation) -> String {
        let bucket = (evaluation.score / KEY_SCORE_BUCKET).floor() as i64;
        let combat = if evaluation.layer(Layer::Combat) > KEY_LAYER_THRESHOLD {
            "hi"
        } else {
            "lo"
        };
        let position = if evaluation.layer(Layer::Position) > KEY_LAYER_THRESHOLD {
            "bad"
        } else {
            "good"
        };
        let team = if evaluation.weights[Layer::Team] > KEY_TEAM_FIGHT_WEIGHT {
            "tf"
        } else {
            "solo"
        };

        format!("{}:{bucket}:{combat}:{position}:{team}", evaluation.mode)
    }

    /// Whether `entry` may stand in for a fresh decision on `evaluation`.
    pub fn can_use_cached(evaluation: &Evaluation, entry: Option<&CacheEntry>, now_ms: u64) -> bool {
        let Some(entry) = entry else {
            return false;
        };

        (evaluation.score - entry.score).abs() <= SCORE_TOLERANCE
            && now_ms.saturating_sub(entry.timestamp_ms) < MAX_AGE_MS
            && evaluation.mode == entry.mode
    }

    /// Returns the agent's cached decision if it is reusable now.
    pub fn lookup(&self, agent: EntityId, evaluation: &Evaluation, now_ms: u64) -> Option<&Decision> {
        let entry = self.entries.get(&agent)?;
        Self::can_use_cached(evaluation, Some(entry), now_ms).then_some(&entry.decision)
    }

    /// Stores `decision` as the agent's live entry.
    ///
    /// Overwriting keeps the agent's original insertion position. Inserting a
    /// new agent past [`CAPACITY`] evicts the oldest-inserted agent.
    pub fn update(
        &mut self,
        agent: EntityId,
        decision: Decision,
        evaluation: &Evaluation,
        now_ms: u64,
    ) {
        let entry = CacheEntry {
            key: Self::generate_key(evaluation),
            decision,
            evaluation: evaluation.clone(),
            score: evaluation.score,
            mode: evaluation.mode,
            timestamp_ms: now_ms,
        };

        if self.entries.insert(agent, entry).is_none() {
            self.order.push_back(agent);
        }

        while self.entries.len() > CAPACITY {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::trace!(agent = %oldest, "evicted cached decision");
        }
    }
}
