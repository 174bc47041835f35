//! Error types for configuration loading and machine operations.

use thiserror::Error;

/// A single reason a machine configuration is inconsistent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("initial state '{initial}' is not a configured state")]
    UnknownInitial { initial: String },

    #[error("transition '{event}' from '{from}' targets unknown state '{to}'")]
    DanglingTarget {
        from: String,
        event: String,
        to: String,
    },
}

/// Errors raised while loading or validating a machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration was supplied
    #[error("no configuration supplied")]
    Missing,

    /// The configuration could not be decoded
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The configuration decoded but references unknown states
    #[error("invalid configuration: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

impl ConfigError {
    /// Violations carried by an `Invalid` error, empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            ConfigError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by [`FiniteStateMachine`](crate::FiniteStateMachine) operations.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid state '{state}'")]
    InvalidState { state: String },

    #[error("no transition for event '{event}' from state '{state}'")]
    InvalidTransition { state: String, event: String },
}

impl FsmError {
    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            FsmError::Config(_) => "CONFIG_ERROR",
            FsmError::InvalidState { .. } => "INVALID_STATE",
            FsmError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}
