//! Result of asking the machine to change state.

/// What happened when a transition was requested.
///
/// Rejection is a normal outcome, not an error: callers that ask for an edge
/// the graph does not declare simply stay where they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum TransitionOutcome {
    /// The target was already the current state. Nothing was recorded.
    Unchanged,

    /// The edge exists and the machine moved to the target.
    Transitioned,

    /// No edge from the current state to the target is declared.
    Rejected,
}

impl TransitionOutcome {
    /// Returns `true` if the machine moved to a new state.
    #[inline]
    pub fn is_transitioned(self) -> bool {
        matches!(self, TransitionOutcome::Transitioned)
    }

    /// Returns `true` if the request was refused by the graph.
    #[inline]
    pub fn is_rejected(self) -> bool {
        matches!(self, TransitionOutcome::Rejected)
    }

    /// Returns `true` unless the request was rejected.
    ///
    /// After an accepted request the machine is guaranteed to be in the
    /// requested state.
    #[inline]
    pub fn is_accepted(self) -> bool {
        !self.is_rejected()
    }
}
