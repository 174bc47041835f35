//! Retrace: a declarative finite state machine interpreter with undo/redo.
//!
//! A machine is described by plain data: an initial state and, for every
//! state, the events it reacts to and the state each event leads to.
//! [`FiniteStateMachine`] interprets that description, tracking the current
//! state and a linear history that can be walked back and forth.
//!
//! # Core Concepts
//!
//! - **Configuration**: [`MachineConfig`], decoded from JSON or assembled with
//!   the [`builder`] API, validated before a machine starts
//! - **Transitions**: `(state, event) -> state` lookups, applied by
//!   [`FiniteStateMachine::trigger`]
//! - **History**: undo/redo stacks of previously active states
//!
//! # Example
//!
//! ```rust
//! use retrace::{fsm_config, FiniteStateMachine, FsmError};
//!
//! let config = fsm_config! {
//!     initial: hungry,
//!     states: {
//!         hungry => { next => fed },
//!         fed => { next => sleepy },
//!         sleepy => { next => hungry },
//!     }
//! }
//! .unwrap();
//!
//! let mut fsm = FiniteStateMachine::new(config).unwrap();
//! fsm.trigger("next").unwrap();
//! fsm.trigger("next").unwrap();
//! assert_eq!(fsm.state(), "sleepy");
//!
//! assert!(fsm.undo());
//! assert_eq!(fsm.state(), "fed");
//!
//! let err = fsm.trigger("nope").unwrap_err();
//! assert!(matches!(err, FsmError::InvalidTransition { .. }));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EventId, FsmError, MachineConfig, StateDefinition, StateId, StateTransition,
};
pub use machine::FiniteStateMachine;
