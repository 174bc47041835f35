//! Builder API for ergonomic configuration construction.
//!
//! This module provides a fluent builder and a macro for assembling
//! machine configurations in code instead of decoding them from JSON.

pub mod config;
pub mod error;
pub mod macros;

pub use config::ConfigBuilder;
pub use error::BuildError;

use crate::core::{MachineConfig, StateId};

/// Create a cyclic configuration: each state moves to the next on `event`,
/// and the last wraps around to the first. The first state is initial.
///
/// # Example
///
/// ```
/// use retrace::builder::cycle;
///
/// let config = cycle("next", ["hungry", "fed", "sleepy"]).unwrap();
///
/// assert_eq!(config.initial, "hungry");
/// assert_eq!(config.target("sleepy", "next").unwrap(), "hungry");
/// ```
pub fn cycle<I>(event: &str, states: I) -> Result<MachineConfig, BuildError>
where
    I: IntoIterator,
    I::Item: Into<StateId>,
{
    let states: Vec<StateId> = states.into_iter().map(Into::into).collect();
    let Some(first) = states.first() else {
        return Err(BuildError::NoStates);
    };

    let builder = states
        .iter()
        .zip(states.iter().cycle().skip(1))
        .fold(ConfigBuilder::new().initial(first), |builder, (from, to)| {
            builder.state(from, [(event, to)])
        });

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        let config = cycle("tick", ["red", "green", "yellow"]).unwrap();

        assert_eq!(config.initial, "red");
        assert_eq!(config.target("red", "tick").unwrap(), "green");
        assert_eq!(config.target("green", "tick").unwrap(), "yellow");
        assert_eq!(config.target("yellow", "tick").unwrap(), "red");
    }

    #[test]
    fn single_state_cycle_loops_on_itself() {
        let config = cycle("spin", ["only"]).unwrap();

        assert_eq!(config.target("only", "spin").unwrap(), "only");
    }

    #[test]
    fn empty_cycle_is_rejected() {
        let result = cycle("tick", Vec::<String>::new());

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn repeated_state_in_cycle_is_rejected() {
        let result = cycle("tick", ["a", "b", "a"]);

        assert!(matches!(result, Err(BuildError::DuplicateState { .. })));
    }
}
