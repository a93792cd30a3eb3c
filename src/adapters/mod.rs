//! Service interface for the remote enrichment API.
//!
//! The trait is the seam between the orchestration logic and the network:
//! the real implementation is the reqwest-backed [`ApiClient`], and tests
//! drive the orchestrator with scripted implementations.

pub mod api;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{DuplicateCheckResult, PipelineEvent};

pub use api::{ApiClient, ApiError};

/// Remote operations the enrichment service exposes to this client
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    /// Check whether a domain was analyzed before.
    ///
    /// Callers treat any error as "not a duplicate"; the lookup is a
    /// non-critical side-check and must never block a submission.
    async fn check_duplicate(&self, domain: &str) -> Result<DuplicateCheckResult>;

    /// Run the enrichment pipeline for `url`, streaming progress.
    ///
    /// `on_event` fires for every decoded event, in wire order, until the
    /// stream ends. Pipeline-reported `error` events are delivered through
    /// the callback and do not terminate the read loop; an `Err` return
    /// means the request itself could not be established or the transport
    /// failed mid-read.
    async fn analyze_stream(
        &self,
        url: &str,
        on_event: &mut (dyn FnMut(PipelineEvent) + Send),
    ) -> Result<()>;
}
