//! Machine configuration: the declarative state/transition map.
//!
//! A configuration is plain data. It can be decoded from JSON of the shape
//!
//! ```json
//! {
//!   "initial": "hungry",
//!   "states": {
//!     "hungry": { "transitions": { "next": "fed" } },
//!     "fed":    { "transitions": { "next": "sleepy" } },
//!     "sleepy": { "transitions": { "next": "hungry" } }
//!   }
//! }
//! ```
//!
//! or assembled with [`ConfigBuilder`](crate::builder::ConfigBuilder).

use super::error::{ConfigError, ConfigViolation};
use super::ids::{EventId, StateId};
use super::table::StateTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outgoing transitions of a single state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    #[serde(default)]
    transitions: BTreeMap<EventId, StateId>,
}

impl StateDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the transition taken on `event`.
    pub fn on(mut self, event: impl Into<EventId>, target: impl Into<StateId>) -> Self {
        self.transitions.insert(event.into(), target.into());
        self
    }

    pub(crate) fn insert(&mut self, event: EventId, target: StateId) -> Option<StateId> {
        self.transitions.insert(event, target)
    }

    /// Target state for `event`, if this state defines it.
    pub fn target(&self, event: &str) -> Option<&StateId> {
        self.transitions.get(event)
    }

    pub fn handles(&self, event: &str) -> bool {
        self.transitions.contains_key(event)
    }

    pub fn transitions(&self) -> &BTreeMap<EventId, StateId> {
        &self.transitions
    }
}

impl<E, T> FromIterator<(E, T)> for StateDefinition
where
    E: Into<EventId>,
    T: Into<StateId>,
{
    fn from_iter<I: IntoIterator<Item = (E, T)>>(iter: I) -> Self {
        Self {
            transitions: iter
                .into_iter()
                .map(|(event, target)| (event.into(), target.into()))
                .collect(),
        }
    }
}

/// Complete machine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// State the machine starts in (and returns to on reset)
    pub initial: StateId,

    /// Every known state, in declaration order
    pub states: StateTable,
}

impl MachineConfig {
    pub fn new(initial: impl Into<StateId>, states: StateTable) -> Self {
        Self {
            initial: initial.into(),
            states,
        }
    }

    /// Decode a configuration from JSON text.
    ///
    /// A literal `null` document is reported as [`ConfigError::Missing`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Option<Self>>(json)?.ok_or(ConfigError::Missing)
    }

    /// Decode a configuration from an already-parsed JSON value.
    ///
    /// State order follows the iteration order of the value's object map,
    /// which is only the document order when `serde_json` preserves it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value::<Option<Self>>(value)?.ok_or(ConfigError::Missing)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Target of `event` when fired from `state`.
    ///
    /// Returns `None` if either the state or the event is unknown.
    pub fn target(&self, state: &str, event: &str) -> Option<&StateId> {
        self.states.get(state)?.target(event)
    }

    /// Check that the initial state and every transition target exist.
    ///
    /// All violations are accumulated rather than stopping at the first one.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if self.states.contains(self.initial.as_str()) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::UnknownInitial {
                initial: self.initial.to_string(),
            })
        });

        for (from, definition) in &self.states {
            for (event, to) in definition.transitions() {
                if !self.states.contains(to.as_str()) {
                    checks.push(Validation::fail(ConfigViolation::DanglingTarget {
                        from: from.to_string(),
                        event: event.to_string(),
                        to: to.to_string(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate), collapsed into a `Result`.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => {
                let violations: Vec<ConfigViolation> = violations.iter().cloned().collect();
                tracing::debug!(
                    "rejecting configuration with {} violation(s)",
                    violations.len()
                );
                Err(ConfigError::Invalid(violations))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hungry_config() -> MachineConfig {
        let mut states = StateTable::new();
        states.insert("hungry", StateDefinition::new().on("next", "fed"));
        states.insert("fed", StateDefinition::new().on("next", "sleepy"));
        states.insert("sleepy", StateDefinition::new().on("next", "hungry"));
        MachineConfig::new("hungry", states)
    }

    #[test]
    fn well_formed_config_validates() {
        let config = hungry_config();

        assert!(config.validate().is_success());
        assert!(config.check().is_ok());
    }

    #[test]
    fn target_resolves_through_state_and_event() {
        let config = hungry_config();

        assert_eq!(config.target("hungry", "next").unwrap(), "fed");
        assert!(config.target("hungry", "eat").is_none());
        assert!(config.target("ghost", "next").is_none());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut states = StateTable::new();
        states.insert("a", StateDefinition::new().on("go", "b").on("jump", "x"));
        states.insert("b", StateDefinition::new().on("back", "y"));
        let config = MachineConfig::new("missing", states);

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::UnknownInitial { .. })));
                assert_eq!(
                    errors
                        .iter()
                        .filter(|e| matches!(e, ConfigViolation::DanglingTarget { .. }))
                        .count(),
                    2
                );
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn check_reports_violations_as_config_error() {
        let mut states = StateTable::new();
        states.insert("a", StateDefinition::new().on("go", "nowhere"));
        let config = MachineConfig::new("a", states);

        let err = config.check().unwrap_err();
        assert_eq!(
            err.violations(),
            &[ConfigViolation::DanglingTarget {
                from: "a".to_string(),
                event: "go".to_string(),
                to: "nowhere".to_string(),
            }]
        );
    }

    #[test]
    fn empty_state_table_fails_on_initial() {
        let config = MachineConfig::new("a", StateTable::new());

        let err = config.check().unwrap_err();
        assert!(matches!(
            err.violations(),
            [ConfigViolation::UnknownInitial { .. }]
        ));
    }

    #[test]
    fn decodes_json_configuration() {
        let config = MachineConfig::from_json(
            r#"{
                "initial": "hungry",
                "states": {
                    "hungry": { "transitions": { "next": "fed" } },
                    "fed": { "transitions": { "next": "sleepy" } },
                    "sleepy": { "transitions": { "next": "hungry" } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config, hungry_config());
    }

    #[test]
    fn null_document_is_missing_config() {
        assert!(matches!(
            MachineConfig::from_json("null"),
            Err(ConfigError::Missing)
        ));
        assert!(matches!(
            MachineConfig::from_value(serde_json::Value::Null),
            Err(ConfigError::Missing)
        ));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        assert!(matches!(
            MachineConfig::from_json(r#"{ "states": {} }"#),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            MachineConfig::from_json("not json"),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            MachineConfig::from_json(r#"{ "initial": "a", "states": [] }"#),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn json_roundtrip_preserves_order() {
        let config = hungry_config();

        let json = config.to_json().unwrap();
        let decoded = MachineConfig::from_json(&json).unwrap();

        assert_eq!(decoded, config);
        let order: Vec<&str> = decoded.states.keys().map(StateId::as_str).collect();
        assert_eq!(order, vec!["hungry", "fed", "sleepy"]);
    }

    #[test]
    fn definition_collects_from_pairs() {
        let definition: StateDefinition = [("next", "fed"), ("", "sleepy")].into_iter().collect();

        assert!(definition.handles("next"));
        assert!(definition.handles(""));
        assert_eq!(definition.target("").unwrap(), "sleepy");
        assert!(!definition.handles("eat"));
    }
}
