//! Duplicate-check lookup result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the domain duplicate check against the results sheet.
///
/// Produced once per submission; either discarded immediately (new domain)
/// or held for display until the user confirms or dismisses the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCheckResult {
    /// Whether the domain was analyzed before
    pub exists: bool,

    /// Normalized domain the check was keyed on
    #[serde(default)]
    pub domain: Option<String>,

    /// When the previous analysis happened, as reported by the server
    #[serde(default)]
    pub last_analyzed: Option<String>,
}

impl DuplicateCheckResult {
    /// The safe default: treat the domain as not previously analyzed.
    ///
    /// Used when the lookup call fails; a broken side-check must never
    /// block a submission.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Parse `last_analyzed` as an RFC 3339 timestamp, if it is one.
    /// The server stores it as free-form text, so this is best-effort.
    pub fn last_analyzed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_analyzed.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
