//! Analyzer integration tests
//!
//! Drive the orchestrator against scripted service implementations,
//! covering the duplicate gate, stream folding, and failure handling.
//! Scripted streams are delivered as raw SSE bytes so the tests exercise
//! the same decode path as the real client.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use enrich::{
    parse_event, Analyzer, DuplicateCheckResult, EnrichmentService, FrameDecoder, PipelineEvent,
    RunState, StepStatus,
};

/// Service double scripted with a duplicate answer and a canned stream
struct ScriptedService {
    /// Duplicate lookup outcome; `Err` simulates a failed lookup call
    duplicate: Result<DuplicateCheckResult, String>,
    /// Raw SSE byte chunks replayed to the event callback
    chunks: Vec<Vec<u8>>,
    /// When set, the analyze call fails instead of streaming
    stream_error: Option<String>,
    /// Domains the duplicate lookup was called with
    checked: Mutex<Vec<String>>,
    /// URLs the pipeline was started for
    analyzed: Mutex<Vec<String>>,
}

impl ScriptedService {
    fn new(duplicate: Result<DuplicateCheckResult, String>, chunks: Vec<Vec<u8>>) -> Self {
        Self {
            duplicate,
            chunks,
            stream_error: None,
            checked: Mutex::new(Vec::new()),
            analyzed: Mutex::new(Vec::new()),
        }
    }

    fn failing_stream(detail: &str) -> Self {
        let mut service = Self::new(Ok(DuplicateCheckResult::not_found()), Vec::new());
        service.stream_error = Some(detail.to_string());
        service
    }

    fn analyzed_urls(&self) -> Vec<String> {
        self.analyzed.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrichmentService for ScriptedService {
    async fn check_duplicate(&self, domain: &str) -> Result<DuplicateCheckResult> {
        self.checked.lock().unwrap().push(domain.to_string());
        match &self.duplicate {
            Ok(result) => Ok(result.clone()),
            Err(msg) => Err(anyhow!("{}", msg)),
        }
    }

    async fn analyze_stream(
        &self,
        url: &str,
        on_event: &mut (dyn FnMut(PipelineEvent) + Send),
    ) -> Result<()> {
        self.analyzed.lock().unwrap().push(url.to_string());

        if let Some(msg) = &self.stream_error {
            return Err(anyhow!("{}", msg));
        }

        let mut decoder = FrameDecoder::new();
        for chunk in &self.chunks {
            for line in decoder.push(chunk) {
                if let Some(event) = parse_event(&line) {
                    on_event(event);
                }
            }
        }
        Ok(())
    }
}

fn duplicate_hit() -> DuplicateCheckResult {
    DuplicateCheckResult {
        exists: true,
        domain: Some("shop.com".to_string()),
        last_analyzed: Some("2025-01-01".to_string()),
    }
}

/// The scrape-running / scrape-ok / result sequence, split mid-frame to
/// prove chunk boundaries do not matter end to end.
fn scripted_run_chunks() -> Vec<Vec<u8>> {
    let stream = concat!(
        "data: {\"type\":\"step\",\"step\":\"scrape\",\"status\":\"running\"}\n",
        "\n",
        "data: {\"type\":\"step\",\"step\":\"scrape\",\"status\":\"ok\",\"duration_ms\":120}\n",
        "data: {\"type\":\"result\",\"data\":{\"domain\":\"x.com\"}}\n",
    )
    .as_bytes();
    vec![stream[..37].to_vec(), stream[37..90].to_vec(), stream[90..].to_vec()]
}

fn sink() -> impl FnMut(&RunState) + Send {
    |_: &RunState| {}
}

#[tokio::test]
async fn test_clear_gate_streams_to_final_state() {
    let service = ScriptedService::new(Ok(DuplicateCheckResult::not_found()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://x.com", &mut sink())
        .await
        .unwrap();

    let state = analyzer.state();
    assert_eq!(state.steps.len(), 1);
    assert_eq!(state.steps[0].step, "scrape");
    assert_eq!(state.steps[0].status, StepStatus::Ok);
    assert_eq!(state.steps[0].duration_ms, Some(120));
    assert_eq!(state.results.as_ref().unwrap()["domain"], "x.com");
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert!(state.duplicate.is_none());
}

#[tokio::test]
async fn test_lookup_uses_normalized_domain() {
    let service = ScriptedService::new(Ok(DuplicateCheckResult::not_found()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://Example.COM/path?x=1", &mut sink())
        .await
        .unwrap();

    // Lookup keys on the domain; the pipeline gets the original URL
    let service = analyzer.service_ref();
    assert_eq!(service.checked.lock().unwrap().as_slice(), ["example.com"]);
    assert_eq!(service.analyzed_urls(), ["https://Example.COM/path?x=1"]);
}

#[tokio::test]
async fn test_duplicate_hit_parks_submission() {
    let service = ScriptedService::new(Ok(duplicate_hit()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://shop.com", &mut sink())
        .await
        .unwrap();

    let state = analyzer.state();
    let duplicate = state.duplicate.as_ref().unwrap();
    assert_eq!(duplicate.domain.as_deref(), Some("shop.com"));
    assert_eq!(duplicate.last_analyzed.as_deref(), Some("2025-01-01"));
    assert!(!state.is_loading);
    assert_eq!(analyzer.pending_submission(), Some("https://shop.com"));

    // No pipeline request was made
    assert!(analyzer.service_ref().analyzed_urls().is_empty());
}

#[tokio::test]
async fn test_dismiss_clears_prompt_without_running() {
    let service = ScriptedService::new(Ok(duplicate_hit()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://shop.com", &mut sink())
        .await
        .unwrap();
    analyzer.dismiss_duplicate();

    assert!(analyzer.state().duplicate.is_none());
    assert_eq!(analyzer.pending_submission(), None);
    assert!(analyzer.service_ref().analyzed_urls().is_empty());
}

#[tokio::test]
async fn test_confirm_runs_exactly_one_request_for_original_url() {
    let service = ScriptedService::new(Ok(duplicate_hit()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://shop.com/collections", &mut sink())
        .await
        .unwrap();
    analyzer.confirm_analyze(&mut sink()).await.unwrap();

    assert_eq!(
        analyzer.service_ref().analyzed_urls(),
        ["https://shop.com/collections"]
    );
    assert!(analyzer.state().duplicate.is_none());
    assert_eq!(analyzer.pending_submission(), None);
    assert!(analyzer.state().results.is_some());
}

#[tokio::test]
async fn test_confirm_with_nothing_pending_is_noop() {
    let service = ScriptedService::new(Ok(DuplicateCheckResult::not_found()), Vec::new());
    let mut analyzer = Analyzer::new(service);

    analyzer.confirm_analyze(&mut sink()).await.unwrap();
    assert!(analyzer.service_ref().analyzed_urls().is_empty());
}

#[tokio::test]
async fn test_lookup_failure_proceeds_as_clear() {
    let service = ScriptedService::new(Err("redis down".to_string()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://x.com", &mut sink())
        .await
        .unwrap();

    // The failed side-check never surfaces; the run happened
    assert!(analyzer.state().error.is_none());
    assert_eq!(analyzer.service_ref().analyzed_urls(), ["https://x.com"]);
}

#[tokio::test]
async fn test_runner_failure_lands_in_state_error() {
    let service = ScriptedService::failing_stream("boom");
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://x.com", &mut sink())
        .await
        .unwrap();

    let state = analyzer.state();
    assert_eq!(state.error.as_deref(), Some("boom"));
    assert!(state.results.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_error_event_does_not_stop_the_stream() {
    let stream = concat!(
        "data: {\"type\":\"error\",\"detail\":\"Pipeline timeout\"}\n",
        "data: {\"type\":\"step\",\"step\":\"cleanup\",\"status\":\"ok\"}\n",
    );
    let service = ScriptedService::new(
        Ok(DuplicateCheckResult::not_found()),
        vec![stream.as_bytes().to_vec()],
    );
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://x.com", &mut sink())
        .await
        .unwrap();

    let state = analyzer.state();
    assert_eq!(state.error.as_deref(), Some("Pipeline timeout"));
    // The step after the error event was still applied
    assert_eq!(state.steps.len(), 1);
    assert_eq!(state.steps[0].step, "cleanup");
}

#[tokio::test]
async fn test_analyze_refused_while_prompting() {
    let service = ScriptedService::new(Ok(duplicate_hit()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://shop.com", &mut sink())
        .await
        .unwrap();

    let refused = analyzer.analyze("https://other.com", &mut sink()).await;
    assert!(refused.is_err());
    assert_eq!(analyzer.pending_submission(), Some("https://shop.com"));
}

#[tokio::test]
async fn test_reset_clears_state_and_pending() {
    let service = ScriptedService::new(Ok(duplicate_hit()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    analyzer
        .analyze("https://shop.com", &mut sink())
        .await
        .unwrap();
    analyzer.reset();

    let state = analyzer.state();
    assert!(state.duplicate.is_none());
    assert!(state.steps.is_empty());
    assert!(state.results.is_none());
    assert!(state.error.is_none());
    assert_eq!(analyzer.pending_submission(), None);

    // The slot is free again
    analyzer
        .analyze("https://shop.com", &mut sink())
        .await
        .unwrap();
    assert!(analyzer.state().duplicate.is_some());
}

#[tokio::test]
async fn test_observer_sees_loading_lifecycle() {
    let service = ScriptedService::new(Ok(DuplicateCheckResult::not_found()), scripted_run_chunks());
    let mut analyzer = Analyzer::new(service);

    let snapshots = Mutex::new(Vec::new());
    let mut observer = |state: &RunState| {
        snapshots
            .lock()
            .unwrap()
            .push((state.is_loading, state.steps.len()));
    };

    analyzer
        .analyze("https://x.com", &mut observer)
        .await
        .unwrap();

    let snapshots = snapshots.into_inner().unwrap();
    assert!(snapshots.first().unwrap().0, "first snapshot is loading");
    assert!(!snapshots.last().unwrap().0, "final snapshot is settled");
    // Step snapshots arrive while the run is in flight
    assert!(snapshots.iter().any(|(loading, steps)| *loading && *steps > 0));
}
