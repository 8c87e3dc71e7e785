//! Bounded ring buffer of completed transitions.

use std::collections::VecDeque;

/// One completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord<S> {
    pub from: S,
    pub to: S,
    /// Caller-supplied timestamp (milliseconds on the caller's clock).
    pub at: u64,
}

/// Fixed-capacity history. Once full, the oldest record is dropped.
#[derive(Debug, Clone)]
pub struct TransitionHistory<S> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

impl<S> TransitionHistory<S> {
    pub const DEFAULT_CAPACITY: usize = 20;

    /// Creates an empty history holding at most `capacity` records.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "TransitionHistory capacity must be positive");
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, record: TransitionRecord<S>) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<S> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut history = TransitionHistory::with_capacity(3);
        for at in 0..5u64 {
            history.push(TransitionRecord {
                from: at as u8,
                to: at as u8 + 1,
                at,
            });
        }

        assert_eq!(history.len(), 3);
        let stamps: Vec<u64> = history.iter().map(|r| r.at).collect();
        assert_eq!(stamps, vec![2, 3, 4]);
        assert_eq!(history.last().map(|r| r.to), Some(5));
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = TransitionHistory::<u8>::with_capacity(0);
    }
}
