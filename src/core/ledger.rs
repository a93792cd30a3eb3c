//! Step ledger reducer.
//!
//! Progress arrives as a stream of step events where the same step is
//! reported first as `running` and later with its outcome. The ledger keeps
//! one record per step name, in first-appearance order, so the progress
//! view stays stable while statuses change underneath it.
//!
//! Expressed as a pure function from (list, event) to a new list rather
//! than a mutable map-plus-array, so it is unit-testable without standing
//! up the streaming machinery.

use crate::domain::{StepEvent, StepRecord};

/// Fold one step event into the ledger.
///
/// A record with the same `step` name (exact, case-sensitive match) is
/// replaced in place; an unseen name is appended. Existing entries are
/// never reordered or removed.
pub fn reduce(mut steps: Vec<StepRecord>, event: StepEvent) -> Vec<StepRecord> {
    let record = StepRecord::from(event);

    match steps.iter().position(|r| r.step == record.step) {
        Some(i) => steps[i] = record,
        None => steps.push(record),
    }
    steps
}
