//! Duplicate gate: the pre-flight check before a pipeline run.
//!
//! A submission is keyed by its domain and looked up against previously
//! analyzed results. A hit parks the submission for explicit confirmation;
//! a miss, or any lookup failure, lets the run proceed immediately.

use tracing::{debug, warn};

use crate::adapters::EnrichmentService;
use crate::domain::DuplicateCheckResult;

/// What the gate decided about a submission
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Not seen before (or the lookup failed): run the pipeline now
    Clear,

    /// Previously analyzed: park the submission and prompt
    Duplicate(DuplicateCheckResult),
}

/// Derive the duplicate-check lookup key from a submission.
///
/// Strips a leading `http://` or `https://` scheme, cuts at the first `/`,
/// and lowercases. Free-text brand input without a scheme or path simply
/// lowercases whole; the lookup then keys on that text as-is.
pub fn lookup_key(input: &str) -> String {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    let host = stripped.split('/').next().unwrap_or(stripped);
    host.to_lowercase()
}

/// Run the duplicate check for a submission.
///
/// The lookup is fire-and-forget: a transport or parse failure is treated
/// as "not a duplicate" rather than surfaced, so a broken side-check never
/// blocks the operator.
pub async fn check(service: &dyn EnrichmentService, input: &str) -> GateOutcome {
    let domain = lookup_key(input);
    debug!(%domain, "Checking for previous analysis");

    match service.check_duplicate(&domain).await {
        Ok(result) if result.exists => GateOutcome::Duplicate(result),
        Ok(_) => GateOutcome::Clear,
        Err(e) => {
            warn!(%domain, error = %e, "Duplicate lookup failed, proceeding as new domain");
            GateOutcome::Clear
        }
    }
}
