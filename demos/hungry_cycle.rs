//! Hungry/Fed/Sleepy Cycle
//!
//! This example walks a cyclic machine forward, back and forward again.
//!
//! Key concepts:
//! - Loading a machine from a JSON configuration
//! - Triggering events and jumping directly to states
//! - Undo/redo over the visited states
//! - Distinguishing rejected operations by error variant
//!
//! Run with: cargo run --example hungry_cycle

use retrace::{FiniteStateMachine, FsmError, StateId};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "initial": "hungry",
    "states": {
        "hungry": { "transitions": { "next": "fed" } },
        "fed":    { "transitions": { "next": "sleepy" } },
        "sleepy": { "transitions": { "next": "hungry", "wake": "hungry" } }
    }
}"#;

fn names(states: &[StateId]) -> Vec<&str> {
    states.iter().map(StateId::as_str).collect()
}

fn main() -> Result<(), FsmError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retrace=debug")),
        )
        .init();

    println!("=== Hungry Cycle State Machine ===\n");

    let mut fsm = FiniteStateMachine::from_json(CONFIG)?;
    println!("Initial state: {}", fsm.state());

    fsm.trigger("next")?;
    fsm.trigger("next")?;
    println!("After two 'next' events: {}", fsm.state());
    println!("History: {:?}\n", names(fsm.history()));

    while fsm.undo() {
        println!("  undo -> {}", fsm.state());
    }
    println!("Nothing left to undo; redo stack: {:?}\n", names(fsm.redo_stack()));

    fsm.redo();
    println!("  redo -> {}", fsm.state());

    match fsm.trigger("nope") {
        Err(err) => println!("Rejected: {err} [{}]", err.code()),
        Ok(()) => unreachable!("'nope' is not a configured event"),
    }

    let waking: Vec<&str> = fsm
        .states_with_event("wake")
        .into_iter()
        .map(StateId::as_str)
        .collect();
    println!("\nStates reacting to 'wake': {:?}", waking);

    fsm.change_state("sleepy")?;
    fsm.reset();
    println!("After jump + reset: {}", fsm.state());

    println!("\nJournal:");
    for transition in fsm.transitions() {
        println!(
            "  {} -> {} ({:?})",
            transition.from, transition.to, transition.cause
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
