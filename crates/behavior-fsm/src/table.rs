//! Adjacency table of allowed transitions.
//!
//! Each source state owns an ordered list of [`Edge`]s. Declaration order is
//! significant: [`crate::StateMachine::update`] walks the list front to back
//! and takes the first edge whose guard holds.

/// Predicate deciding whether an edge may be taken for a given context.
pub type Guard<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A directed, guarded edge to `to`.
pub struct Edge<S, C> {
    to: S,
    guard: Guard<C>,
}

impl<S: Copy, C> Edge<S, C> {
    /// Target state of this edge.
    #[inline]
    pub fn to(&self) -> S {
        self.to
    }

    /// Evaluates the guard against `ctx`.
    #[inline]
    pub fn allows(&self, ctx: &C) -> bool {
        (self.guard)(ctx)
    }
}

/// Explicit transition graph keyed by source state.
///
/// # Example
///
/// ```rust
/// use behavior_fsm::TransitionTable;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Light { Red, Green }
///
/// let table: TransitionTable<Light, u32> = TransitionTable::new()
///     .edge(Light::Red, Light::Green, |elapsed: &u32| *elapsed >= 30)
///     .edge(Light::Green, Light::Red, |elapsed: &u32| *elapsed >= 25);
///
/// assert!(table.has_edge(Light::Red, Light::Green));
/// ```
pub struct TransitionTable<S, C> {
    rows: Vec<(S, Vec<Edge<S, C>>)>,
}

impl<S: Copy + Eq, C> TransitionTable<S, C> {
    /// Creates an empty table. Every transition is rejected until edges are added.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Declares an edge `from → to` guarded by `guard` (builder pattern).
    ///
    /// Edges from the same source are evaluated in the order they are declared.
    pub fn edge<F>(mut self, from: S, to: S, guard: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        let edge = Edge {
            to,
            guard: Box::new(guard),
        };

        match self.rows.iter_mut().find(|(state, _)| *state == from) {
            Some((_, edges)) => edges.push(edge),
            None => self.rows.push((from, vec![edge])),
        }
        self
    }

    /// Outgoing edges of `from` in declaration order.
    pub fn edges_from(&self, from: S) -> &[Edge<S, C>] {
        self.rows
            .iter()
            .find(|(state, _)| *state == from)
            .map(|(_, edges)| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if an edge `from → to` is declared, regardless of its guard.
    pub fn has_edge(&self, from: S, to: S) -> bool {
        self.edges_from(from).iter().any(|edge| edge.to == to)
    }
}

impl<S: Copy + Eq, C> Default for TransitionTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Door {
        Open,
        Closed,
        Locked,
    }

    #[test]
    fn edges_keep_declaration_order() {
        let table: TransitionTable<Door, ()> = TransitionTable::new()
            .edge(Door::Closed, Door::Locked, |_| true)
            .edge(Door::Open, Door::Closed, |_| true)
            .edge(Door::Closed, Door::Open, |_| true);

        let targets: Vec<Door> = table.edges_from(Door::Closed).iter().map(|e| e.to()).collect();
        assert_eq!(targets, vec![Door::Locked, Door::Open]);
    }

    #[test]
    fn undeclared_source_has_no_edges() {
        let table: TransitionTable<Door, ()> =
            TransitionTable::new().edge(Door::Open, Door::Closed, |_| true);

        assert!(table.edges_from(Door::Locked).is_empty());
        assert!(!table.has_edge(Door::Closed, Door::Open));
        assert!(table.has_edge(Door::Open, Door::Closed));
    }

    #[test]
    fn guard_reads_context() {
        let table: TransitionTable<Door, bool> =
            TransitionTable::new().edge(Door::Closed, Door::Open, |has_key: &bool| *has_key);

        let edge = &table.edges_from(Door::Closed)[0];
        assert!(edge.allows(&true));
        assert!(!edge.allows(&false));
    }
}
