//! Core data types of the state machine.
//!
//! This module contains the plain-data side of the engine:
//! - State and event identifiers
//! - The ordered state table and machine configuration
//! - Undo/redo history and the transition journal
//! - Error types
//!
//! The interpreter that drives these lives in [`crate::machine`].

mod config;
mod error;
mod history;
mod ids;
mod table;

pub use config::{MachineConfig, StateDefinition};
pub use error::{ConfigError, ConfigViolation, FsmError};
pub use history::{StateTransition, TransitionCause, UndoHistory};
pub use ids::{EventId, StateId};
pub use table::StateTable;
