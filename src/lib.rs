//! enrich - streaming client for the e-commerce enrichment pipeline
//!
//! Submits a company URL to the remote enrichment service and follows the
//! run over a Server-Sent-Events stream, exposing live step progress and
//! the final structured result.
//!
//! # Architecture
//!
//! The flow for one submission:
//! - the duplicate gate looks the domain up against previous analyses and
//!   either proceeds or parks the URL pending confirmation
//! - the streaming runner decodes the response bytes into lines, lines
//!   into typed events
//! - the step ledger folds step events into a stable ordered progress view
//! - the `Analyzer` owns the single observable `RunState` the UI reads
//!
//! # Modules
//!
//! - `adapters`: the HTTP client and the service trait it implements
//! - `stream`: frame decoding and SSE event parsing
//! - `core`: gate, ledger and orchestrator
//! - `domain`: data structures (events, run state, results)
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Analyze a store with live progress
//! enrich analyze https://shop.example.com
//!
//! # Check whether a domain was analyzed before
//! enrich check shop.example.com
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod stream;

// Re-export main types at crate root for convenience
pub use adapters::{ApiClient, ApiError, EnrichmentService};
pub use crate::core::{Analyzer, GateOutcome};
pub use domain::{
    DuplicateCheckResult, PipelineEvent, ResultSummary, RunState, StepEvent, StepRecord,
    StepStatus,
};
pub use stream::{parse_event, FrameDecoder};
