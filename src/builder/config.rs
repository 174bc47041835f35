//! Builder for constructing machine configurations.

use crate::builder::error::BuildError;
use crate::core::{EventId, MachineConfig, StateDefinition, StateId, StateTable};

/// Builder for machine configurations with a fluent API.
///
/// # Example
///
/// ```
/// use retrace::builder::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .initial("idle")
///     .state("idle", [("start", "running")])
///     .state("running", [("stop", "idle")])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.initial, "idle");
/// assert_eq!(config.states.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    initial: Option<StateId>,
    states: StateTable,
    duplicate: Option<StateId>,
}

impl ConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state together with its outgoing transitions.
    ///
    /// Declaring the same state twice fails at [`build`](Self::build).
    pub fn state<I, E, T>(mut self, state: impl Into<StateId>, transitions: I) -> Self
    where
        I: IntoIterator<Item = (E, T)>,
        E: Into<EventId>,
        T: Into<StateId>,
    {
        let state = state.into();
        if self.states.contains(state.as_str()) {
            if self.duplicate.is_none() {
                self.duplicate = Some(state);
            }
            return self;
        }
        self.states
            .insert(state, transitions.into_iter().collect::<StateDefinition>());
        self
    }

    /// Declare a state with no outgoing transitions.
    pub fn terminal(self, state: impl Into<StateId>) -> Self {
        self.state(state, std::iter::empty::<(EventId, StateId)>())
    }

    /// Add one transition, declaring `from` if it is not known yet.
    pub fn transition(
        mut self,
        from: impl Into<StateId>,
        event: impl Into<EventId>,
        to: impl Into<StateId>,
    ) -> Self {
        let from = from.into();
        match self.states.get_mut(from.as_str()) {
            Some(definition) => {
                definition.insert(event.into(), to.into());
            }
            None => {
                self.states
                    .insert(from, StateDefinition::new().on(event, to));
            }
        }
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<MachineConfig, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        if let Some(state) = self.duplicate {
            return Err(BuildError::DuplicateState {
                state: state.to_string(),
            });
        }

        let config = MachineConfig::new(initial, self.states);
        config.check()?;
        Ok(config)
    }
}
