//! Observable run state.
//!
//! `RunState` is the single aggregate the rest of the application (the CLI
//! progress renderer, result printing) reads. It is exclusively owned and
//! serially mutated by the [`Analyzer`](crate::core::Analyzer).

use serde::Serialize;
use serde_json::Value;

use super::duplicate::DuplicateCheckResult;
use super::events::StepRecord;

/// Aggregate state of the current (or most recent) analysis run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunState {
    /// Final enrichment payload, forwarded verbatim from the stream
    pub results: Option<Value>,

    /// Ordered, per-step-deduplicated progress ledger
    pub steps: Vec<StepRecord>,

    /// Whether a pipeline run is currently in flight
    pub is_loading: bool,

    /// Most recent error message; replaced, never queued
    pub error: Option<String>,

    /// Outstanding duplicate prompt, if the gate parked the submission
    pub duplicate: Option<DuplicateCheckResult>,
}

impl RunState {
    /// Return to the all-empty initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prepare for a fresh pipeline run: clear everything left over from a
    /// previous run or prompt, and mark the run in flight.
    pub fn begin_run(&mut self) {
        self.results = None;
        self.steps.clear();
        self.error = None;
        self.duplicate = None;
        self.is_loading = true;
    }
}
