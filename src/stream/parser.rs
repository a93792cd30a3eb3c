//! SSE line parsing.
//!
//! Each meaningful frame is `data: <json>`. Blank lines, comment lines and
//! garbled payloads are dropped without aborting the stream; a partial or
//! corrupted frame must never kill an otherwise-successful run.

use tracing::debug;

use crate::domain::{PipelineEvent, UNKNOWN_PIPELINE_ERROR};

/// SSE data-frame prefix, including the trailing space
const DATA_PREFIX: &str = "data: ";

/// Parse one decoded line into a pipeline event.
///
/// Returns `None` for anything that is not a well-formed event frame:
/// lines without the `data: ` prefix, empty payloads, invalid JSON, and
/// payloads with an unrecognized `type` discriminator. The `detail` of an
/// error event is normalized so it is never absent or empty.
pub fn parse_event(line: &str) -> Option<PipelineEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload.is_empty() {
        return None;
    }

    let mut event = match serde_json::from_str::<PipelineEvent>(payload) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "Dropping malformed stream frame");
            return None;
        }
    };

    if let PipelineEvent::Error { detail } = &mut event {
        if detail.as_deref().map_or(true, str::is_empty) {
            *detail = Some(UNKNOWN_PIPELINE_ERROR.to_string());
        }
    }

    Some(event)
}
