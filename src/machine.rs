//! Finite state machine interpreter with undo/redo.

use crate::core::{
    ConfigError, EventId, FsmError, MachineConfig, StateId, StateTransition, TransitionCause,
    UndoHistory,
};
use chrono::Utc;

/// Interprets a [`MachineConfig`], tracking the current state and a linear
/// undo/redo history of visited states.
///
/// The configuration is validated when the machine is created, so the
/// current state is always one of the configured states.
///
/// # Example
///
/// ```rust
/// use retrace::FiniteStateMachine;
///
/// let mut fsm = FiniteStateMachine::from_json(r#"{
///     "initial": "hungry",
///     "states": {
///         "hungry": { "transitions": { "next": "fed" } },
///         "fed":    { "transitions": { "next": "sleepy" } },
///         "sleepy": { "transitions": { "next": "hungry" } }
///     }
/// }"#).unwrap();
///
/// fsm.trigger("next").unwrap();
/// assert_eq!(fsm.state(), "fed");
///
/// assert!(fsm.undo());
/// assert_eq!(fsm.state(), "hungry");
/// assert!(fsm.redo());
/// assert_eq!(fsm.state(), "fed");
/// ```
#[derive(Clone, Debug)]
pub struct FiniteStateMachine {
    config: MachineConfig,
    current: StateId,
    history: UndoHistory,
    journal: Vec<StateTransition>,
}

impl FiniteStateMachine {
    /// Create a machine in the configured initial state.
    ///
    /// Fails with [`ConfigError::Invalid`] if the initial state or any
    /// transition target is not a configured state.
    pub fn new(config: MachineConfig) -> Result<Self, FsmError> {
        config.check()?;
        Ok(Self {
            current: config.initial.clone(),
            config,
            history: UndoHistory::new(),
            journal: Vec::new(),
        })
    }

    /// Decode a JSON configuration and create a machine from it.
    pub fn from_json(json: &str) -> Result<Self, FsmError> {
        Self::new(MachineConfig::from_json(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, FsmError> {
        Self::new(MachineConfig::from_value(value)?)
    }

    /// Currently active state.
    pub fn state(&self) -> &StateId {
        &self.current
    }

    pub fn initial(&self) -> &StateId {
        &self.config.initial
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Move directly to `state`.
    ///
    /// The current state is pushed onto the undo history and the redo stack
    /// is cleared. Nothing changes if `state` is not configured.
    pub fn change_state(&mut self, state: &str) -> Result<(), FsmError> {
        let Some(target) = self.config.states.key(state).cloned() else {
            tracing::debug!("rejecting change to unknown state '{}'", state);
            return Err(FsmError::InvalidState {
                state: state.to_string(),
            });
        };
        self.enter(target, TransitionCause::Direct);
        Ok(())
    }

    /// Fire `event` from the current state.
    ///
    /// Behaves like [`change_state`](Self::change_state) to the mapped
    /// target. Fails without changing anything if the current state has no
    /// transition for `event`.
    pub fn trigger(&mut self, event: &str) -> Result<(), FsmError> {
        let Some(target) = self.config.target(self.current.as_str(), event).cloned() else {
            tracing::debug!(
                "no transition for event '{}' from state '{}'",
                event,
                self.current
            );
            return Err(FsmError::InvalidTransition {
                state: self.current.to_string(),
                event: event.to_string(),
            });
        };

        debug_assert!(self.config.states.contains(target.as_str()));

        self.enter(target, TransitionCause::Event(EventId::new(event)));
        Ok(())
    }

    /// Return to the initial state.
    ///
    /// Resetting is an ordinary, undoable move. Returns `false` without
    /// touching the history when the machine is already in its initial
    /// state.
    pub fn reset(&mut self) -> bool {
        if self.current == self.config.initial {
            tracing::trace!("reset: already in initial state '{}'", self.current);
            return false;
        }
        let initial = self.config.initial.clone();
        self.enter(initial, TransitionCause::Reset);
        true
    }

    /// Every configured state, in declaration order.
    pub fn states(&self) -> Vec<&StateId> {
        self.config.states.keys().collect()
    }

    /// States that define a transition for `event`, in declaration order.
    pub fn states_with_event(&self, event: &str) -> Vec<&StateId> {
        self.config
            .states
            .iter()
            .filter(|(_, definition)| definition.handles(event))
            .map(|(state, _)| state)
            .collect()
    }

    /// [`states`](Self::states) when `event` is `None`, otherwise
    /// [`states_with_event`](Self::states_with_event).
    pub fn states_for(&self, event: Option<&str>) -> Vec<&StateId> {
        match event {
            Some(event) => self.states_with_event(event),
            None => self.states(),
        }
    }

    /// Events the current state can react to, sorted by name.
    pub fn events(&self) -> Vec<&EventId> {
        self.config
            .states
            .get(self.current.as_str())
            .map(|definition| definition.transitions().keys().collect())
            .unwrap_or_default()
    }

    pub fn can_trigger(&self, event: &str) -> bool {
        self.config.target(self.current.as_str(), event).is_some()
    }

    /// Go back to the previously active state.
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.step_back(self.current.clone()) {
            Some(previous) => {
                self.commit(previous, TransitionCause::Undo);
                true
            }
            None => {
                tracing::trace!("undo: history is empty");
                false
            }
        }
    }

    /// Re-apply the most recently undone state.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.step_forward(self.current.clone()) {
            Some(next) => {
                self.commit(next, TransitionCause::Redo);
                true
            }
            None => {
                tracing::trace!("redo: redo stack is empty");
                false
            }
        }
    }

    /// Forget the undo history, the redo stack and the journal.
    ///
    /// The current state is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.journal.clear();
    }

    /// Previously active states, oldest first.
    pub fn history(&self) -> &[StateId] {
        self.history.past()
    }

    /// Undone states; the next [`redo`](Self::redo) target is last.
    pub fn redo_stack(&self) -> &[StateId] {
        self.history.future()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Every committed move since creation or the last
    /// [`clear_history`](Self::clear_history), oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.journal
    }

    /// Fresh move: record the state being left, then commit.
    fn enter(&mut self, target: StateId, cause: TransitionCause) {
        self.history.record(self.current.clone());
        self.commit(target, cause);
    }

    fn commit(&mut self, target: StateId, cause: TransitionCause) {
        let from = std::mem::replace(&mut self.current, target);
        tracing::debug!("{} -> {} ({:?})", from, self.current, cause);
        self.journal.push(StateTransition {
            from,
            to: self.current.clone(),
            cause,
            timestamp: Utc::now(),
        });
    }
}

impl TryFrom<MachineConfig> for FiniteStateMachine {
    type Error = FsmError;

    fn try_from(config: MachineConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl TryFrom<Option<MachineConfig>> for FiniteStateMachine {
    type Error = FsmError;

    fn try_from(config: Option<MachineConfig>) -> Result<Self, Self::Error> {
        Self::new(config.ok_or(ConfigError::Missing)?)
    }
}
