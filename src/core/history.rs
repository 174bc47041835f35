//! Undo/redo bookkeeping and the transition journal.
//!
//! [`UndoHistory`] holds two stacks of previously active states: `past`
//! (undo) and `future` (redo). Neither stack ever contains the current
//! state. [`StateTransition`] records describe every committed move.

use super::ids::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What caused a committed move between states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// An event resolved through the transition table
    Event(EventId),
    /// A direct `change_state` call
    Direct,
    /// Return to the initial state
    Reset,
    Undo,
    Redo,
}

/// Record of a single committed move.
///
/// # Example
///
/// ```rust
/// use retrace::core::{StateTransition, TransitionCause};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "hungry".into(),
///     to: "fed".into(),
///     cause: TransitionCause::Event("next".into()),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "fed");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// Why the move happened
    pub cause: TransitionCause,
    /// When the move was committed
    pub timestamp: DateTime<Utc>,
}

/// Linear undo/redo history.
///
/// # Example
///
/// ```rust
/// use retrace::core::{StateId, UndoHistory};
///
/// let mut history = UndoHistory::new();
/// history.record(StateId::new("hungry"));
///
/// let previous = history.step_back(StateId::new("fed"));
/// assert_eq!(previous.unwrap(), "hungry");
/// assert_eq!(history.future()[0], "fed");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UndoHistory {
    past: Vec<StateId>,
    future: Vec<StateId>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `left` as the state being left by a fresh move.
    ///
    /// A fresh move supersedes everything that was undone, so the redo
    /// stack is dropped.
    pub fn record(&mut self, left: StateId) {
        self.past.push(left);
        self.future.clear();
    }

    /// Pop the most recent past state, parking `current` on the redo stack.
    ///
    /// Returns `None` without touching either stack when there is nothing
    /// to undo.
    pub fn step_back(&mut self, current: StateId) -> Option<StateId> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Pop the most recently undone state, pushing `current` back onto the
    /// undo stack.
    pub fn step_forward(&mut self, current: StateId) -> Option<StateId> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Previously active states, oldest first.
    pub fn past(&self) -> &[StateId] {
        &self.past
    }

    /// Undone states, the next redo target last.
    pub fn future(&self) -> &[StateId] {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(states: &[StateId]) -> Vec<&str> {
        states.iter().map(StateId::as_str).collect()
    }

    #[test]
    fn new_history_is_empty() {
        let history = UndoHistory::new();

        assert!(history.past().is_empty());
        assert!(history.future().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn record_clears_future() {
        let mut history = UndoHistory::new();
        history.record("a".into());
        history.step_back("b".into());
        assert!(history.can_redo());

        history.record("a".into());

        assert_eq!(ids(history.past()), vec!["a"]);
        assert!(history.future().is_empty());
    }

    #[test]
    fn step_back_on_empty_is_noop() {
        let mut history = UndoHistory::new();

        assert!(history.step_back("a".into()).is_none());
        assert!(history.future().is_empty());
    }

    #[test]
    fn step_forward_on_empty_is_noop() {
        let mut history = UndoHistory::new();
        history.record("a".into());

        assert!(history.step_forward("b".into()).is_none());
        assert_eq!(ids(history.past()), vec!["a"]);
    }

    #[test]
    fn back_then_forward_restores_stacks() {
        let mut history = UndoHistory::new();
        history.record("a".into());
        history.record("b".into());
        let before = history.clone();

        let previous = history.step_back("c".into()).unwrap();
        assert_eq!(previous, "b");
        assert_eq!(ids(history.future()), vec!["c"]);

        let next = history.step_forward(previous).unwrap();
        assert_eq!(next, "c");
        assert_eq!(history, before);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history = UndoHistory::new();
        history.record("a".into());
        history.record("b".into());
        history.step_back("c".into());

        history.clear();

        assert_eq!(history, UndoHistory::new());
    }

    #[test]
    fn transition_serializes_correctly() {
        let transition = StateTransition {
            from: "hungry".into(),
            to: "fed".into(),
            cause: TransitionCause::Event("next".into()),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&transition).unwrap();
        let deserialized: StateTransition = serde_json::from_str(&json).unwrap();

        assert_eq!(transition, deserialized);
    }
}
