//! Wire-level event types for the enrichment stream.
//!
//! The server reports progress as newline-terminated SSE frames, each
//! carrying a JSON payload tagged by a `type` field. Everything the client
//! learns about a run arrives as one of these events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback message when an `error` frame carries no detail
pub const UNKNOWN_PIPELINE_ERROR: &str = "Unknown pipeline error";

/// A single event decoded from the pipeline stream.
///
/// Frames with any other `type` value fail to deserialize and are dropped
/// by the parser rather than aborting the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A pipeline step started or changed status
    Step(StepEvent),

    /// The final enrichment payload
    Result {
        /// Forwarded verbatim; the client does not interpret its shape
        data: Value,
    },

    /// A pipeline-level failure reported mid-stream
    Error {
        #[serde(default)]
        detail: Option<String>,
    },
}

/// Progress report for a single named pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Step name; the identity key for progress display
    pub step: String,

    /// Current status of the step
    pub status: StepStatus,

    /// Time taken in milliseconds (present once the step finishes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Optional human-readable note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Status of a pipeline step as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Currently executing
    Running,

    /// Completed successfully
    Ok,

    /// Completed with a degraded result
    Warn,

    /// Failed
    Fail,

    /// Skipped
    Skip,
}

impl StepStatus {
    /// Check whether the step has finished (in any outcome)
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Single-character marker used for progress rendering
    pub fn glyph(self) -> char {
        match self {
            Self::Running => '…',
            Self::Ok => '✓',
            Self::Warn => '!',
            Self::Fail => '✗',
            Self::Skip => '-',
        }
    }
}

/// The durable, displayable form of a [`StepEvent`].
///
/// The step ledger holds at most one record per step name, updated in place
/// as later events arrive for the same step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub status: StepStatus,
    pub duration_ms: Option<u64>,
    pub detail: Option<String>,
}

impl From<StepEvent> for StepRecord {
    fn from(event: StepEvent) -> Self {
        Self {
            step: event.step,
            status: event.status,
            duration_ms: event.duration_ms,
            detail: event.detail,
        }
    }
}
