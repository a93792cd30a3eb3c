//! HTTP client for the enrichment API.
//!
//! Two endpoints matter here: the duplicate lookup (a plain JSON GET) and
//! the streaming analyze endpoint, whose response body is consumed chunk by
//! chunk through the frame decoder.

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ResolvedConfig;
use crate::domain::{DuplicateCheckResult, PipelineEvent};
use crate::stream::{parse_event, FrameDecoder};

use super::EnrichmentService;

/// Fallback message for a non-success analyze response without a detail
const ANALYSIS_FAILED: &str = "Analysis failed";

/// Failures establishing or draining an enrichment request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status; `detail` comes from the error body when
    /// the server provided one
    #[error("{detail}")]
    Status { status: StatusCode, detail: String },

    /// The response carried no body to stream
    #[error("No response body")]
    NoBody,

    /// Request could not be sent or the connection dropped mid-read
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Reqwest-backed client for the enrichment service
pub struct ApiClient {
    base_url: String,
    lookup_timeout: std::time::Duration,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            lookup_timeout: std::time::Duration::from_secs(30),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut client = Self::new(config.api_url.clone());
        client.lookup_timeout = std::time::Duration::from_secs(config.timeout_seconds);
        client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pull a `detail` string out of a JSON error body, if there is one
fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[async_trait]
impl EnrichmentService for ApiClient {
    #[instrument(skip(self))]
    async fn check_duplicate(&self, domain: &str) -> Result<DuplicateCheckResult> {
        let result = self
            .http
            .get(self.endpoint("/api/v2/enrichment/check-duplicate"))
            .query(&[("domain", domain)])
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(ApiError::Transport)?
            .error_for_status()
            .map_err(ApiError::Transport)?
            .json::<DuplicateCheckResult>()
            .await
            .map_err(ApiError::Transport)?;

        debug!(domain, exists = result.exists, "Duplicate check completed");
        Ok(result)
    }

    #[instrument(skip(self, on_event))]
    async fn analyze_stream(
        &self,
        url: &str,
        on_event: &mut (dyn FnMut(PipelineEvent) + Send),
    ) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("/api/v2/enrichment/analyze-stream"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = detail_from_body(&body).unwrap_or_else(|| ANALYSIS_FAILED.to_string());
            return Err(ApiError::Status { status, detail }.into());
        }

        let mut stream = response.bytes_stream();
        let mut decoder = FrameDecoder::new();
        let mut saw_bytes = false;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ApiError::Transport)?;
            saw_bytes = saw_bytes || !chunk.is_empty();

            for line in decoder.push(&chunk) {
                if let Some(event) = parse_event(&line) {
                    on_event(event);
                }
            }
        }

        if !saw_bytes {
            return Err(ApiError::NoBody.into());
        }

        debug!(url, pending_bytes = decoder.pending(), "Stream drained");
        Ok(())
    }
}
