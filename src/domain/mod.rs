//! Domain types for the enrichment client.
//!
//! This module contains the core data structures:
//! - Events: typed frames decoded from the pipeline stream
//! - State: the observable aggregate of a run
//! - Duplicate: the duplicate-check lookup result
//! - Result: typed view of the final payload for display

pub mod duplicate;
pub mod events;
pub mod result;
pub mod state;

// Re-export commonly used types
pub use duplicate::DuplicateCheckResult;
pub use events::{PipelineEvent, StepEvent, StepRecord, StepStatus, UNKNOWN_PIPELINE_ERROR};
pub use result::{OrdersPrediction, ResultSummary};
pub use state::RunState;
