//! The state machine itself.

use std::fmt::Debug;

use crate::{TransitionHistory, TransitionOutcome, TransitionRecord, TransitionTable};

/// Guarded finite state machine over states `S` and guard context `C`.
///
/// # Semantics
///
/// - [`set_state`](Self::set_state) moves along a declared edge without
///   consulting its guard. Requests for undeclared edges are refused and leave
///   the machine untouched.
/// - [`update`](Self::update) inspects the current state's edges in
///   declaration order and follows the first one whose guard holds.
///
/// There is no terminal state: the machine cycles for as long as its owner
/// keeps ticking it.
pub struct StateMachine<S, C> {
    current: S,
    table: TransitionTable<S, C>,
    history: TransitionHistory<S>,
}

impl<S, C> StateMachine<S, C>
where
    S: Copy + Eq + Debug,
{
    /// Creates a machine in `initial` with the default history capacity.
    pub fn new(initial: S, table: TransitionTable<S, C>) -> Self {
        Self::with_history_capacity(initial, table, TransitionHistory::<S>::DEFAULT_CAPACITY)
    }

    /// Creates a machine in `initial` keeping at most `capacity` history records.
    pub fn with_history_capacity(initial: S, table: TransitionTable<S, C>, capacity: usize) -> Self {
        Self {
            current: initial,
            table,
            history: TransitionHistory::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn current(&self) -> S {
        self.current
    }

    pub fn history(&self) -> &TransitionHistory<S> {
        &self.history
    }

    pub fn table(&self) -> &TransitionTable<S, C> {
        &self.table
    }

    /// Returns `true` if an edge from the current state to `target` is declared.
    pub fn can_transition(&self, target: S) -> bool {
        self.table.has_edge(self.current, target)
    }

    /// Requests a move to `target` at caller time `at`.
    ///
    /// # Returns
    ///
    /// - [`TransitionOutcome::Unchanged`] if `target` is already current
    /// - [`TransitionOutcome::Rejected`] if the graph has no such edge
    /// - [`TransitionOutcome::Transitioned`] otherwise; the move is recorded
    pub fn set_state(&mut self, target: S, at: u64) -> TransitionOutcome {
        if target == self.current {
            return TransitionOutcome::Unchanged;
        }

        if !self.can_transition(target) {
            return TransitionOutcome::Rejected;
        }

        self.history.push(TransitionRecord {
            from: self.current,
            to: target,
            at,
        });
        self.current = target;
        TransitionOutcome::Transitioned
    }

    /// Follows the first outgoing edge whose guard holds for `ctx`.
    ///
    /// # Returns
    ///
    /// The new state if a transition happened, `None` otherwise.
    pub fn update(&mut self, ctx: &C, at: u64) -> Option<S> {
        let next = self
            .table
            .edges_from(self.current)
            .iter()
            .find(|edge| edge.allows(ctx))
            .map(|edge| edge.to())?;

        self.set_state(next, at).is_transitioned().then_some(next)
    }
}
