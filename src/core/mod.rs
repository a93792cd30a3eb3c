//! Client-side orchestration logic.
//!
//! This module contains:
//! - Ledger: the pure reducer behind the step progress view
//! - Gate: the duplicate-check workflow in front of a submission
//! - Orchestrator: the `Analyzer` composing gate, runner and ledger

pub mod gate;
pub mod ledger;
pub mod orchestrator;

// Re-export commonly used types
pub use gate::{check as gate_check, lookup_key, GateOutcome};
pub use ledger::reduce;
pub use orchestrator::{Analyzer, StateObserver};
