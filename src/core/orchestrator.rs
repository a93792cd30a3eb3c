//! Analysis orchestrator.
//!
//! Composes the duplicate gate, the streaming runner and the step ledger
//! into the four operations the rest of the application calls: start an
//! analysis, confirm a parked one, dismiss a parked one, reset. The
//! orchestrator is the sole owner of the observable [`RunState`] and of
//! the single pending submission slot.

use anyhow::Result;
use tracing::{info, instrument};

use crate::adapters::EnrichmentService;
use crate::domain::{PipelineEvent, RunState, UNKNOWN_PIPELINE_ERROR};

use super::gate::{self, GateOutcome};
use super::ledger;

/// Observer invoked with a state snapshot after every mutation during a
/// run, so a progress renderer can follow along.
pub type StateObserver<'a> = &'a mut (dyn FnMut(&RunState) + Send);

/// Drives enrichment runs against a service and owns their state
pub struct Analyzer<S: EnrichmentService> {
    service: S,
    state: RunState,
    /// The single URL parked by a duplicate prompt. Set exactly when the
    /// gate prompts, cleared exactly on confirm, dismiss or reset.
    pending: Option<String>,
}

impl<S: EnrichmentService> Analyzer<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RunState::default(),
            pending: None,
        }
    }

    /// Current observable state
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The service this analyzer submits to
    pub fn service_ref(&self) -> &S {
        &self.service
    }

    /// URL awaiting confirmation, if a duplicate prompt is outstanding
    pub fn pending_submission(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Start an analysis for a URL or free-text brand string.
    ///
    /// Runs the duplicate gate first. A clear gate starts the pipeline
    /// immediately; a duplicate hit parks the submission and exposes the
    /// lookup result in `state().duplicate` without touching anything
    /// else. Refuses to start while a run is in flight or a prompt is
    /// outstanding, since the state holds exactly one run at a time.
    #[instrument(skip(self, observer))]
    pub async fn analyze(&mut self, input: &str, observer: StateObserver<'_>) -> Result<()> {
        if self.state.is_loading {
            anyhow::bail!("An analysis is already in progress");
        }
        if self.pending.is_some() {
            anyhow::bail!("A duplicate prompt is awaiting confirmation");
        }

        match gate::check(&self.service, input).await {
            GateOutcome::Duplicate(result) => {
                info!(domain = result.domain.as_deref().unwrap_or(""), "Previous analysis found, prompting");
                self.state.duplicate = Some(result);
                self.pending = Some(input.to_string());
                observer(&self.state);
                Ok(())
            }
            GateOutcome::Clear => self.run_pipeline(input, observer).await,
        }
    }

    /// Run the pipeline for the parked submission.
    ///
    /// No-op when nothing is pending.
    #[instrument(skip(self, observer))]
    pub async fn confirm_analyze(&mut self, observer: StateObserver<'_>) -> Result<()> {
        self.state.duplicate = None;
        match self.pending.take() {
            Some(url) => self.run_pipeline(&url, observer).await,
            None => Ok(()),
        }
    }

    /// Discard the parked submission without running the pipeline.
    ///
    /// Always succeeds; a no-op when nothing is pending.
    pub fn dismiss_duplicate(&mut self) {
        self.state.duplicate = None;
        self.pending = None;
    }

    /// Clear all observable state and any pending submission.
    ///
    /// Does not abort an in-flight stream read; with a single run at a
    /// time there is never one outstanding when this is callable.
    pub fn reset(&mut self) {
        self.state.reset();
        self.pending = None;
    }

    /// Drive one pipeline run, folding stream events into state.
    ///
    /// A failure to establish or hold the connection lands in
    /// `state().error` rather than propagating: the run state is the
    /// error surface, exactly one message at a time.
    async fn run_pipeline(&mut self, url: &str, observer: StateObserver<'_>) -> Result<()> {
        self.state.begin_run();
        observer(&self.state);

        let service = &self.service;
        let state = &mut self.state;

        let mut on_event = |event: PipelineEvent| {
            match event {
                PipelineEvent::Step(step) => {
                    state.steps = ledger::reduce(std::mem::take(&mut state.steps), step);
                }
                PipelineEvent::Result { data } => {
                    state.results = Some(data);
                }
                PipelineEvent::Error { detail } => {
                    state.error =
                        Some(detail.unwrap_or_else(|| UNKNOWN_PIPELINE_ERROR.to_string()));
                }
            }
            observer(state);
        };

        let outcome = service.analyze_stream(url, &mut on_event).await;

        if let Err(e) = outcome {
            self.state.error = Some(e.to_string());
        }
        self.state.is_loading = false;
        observer(&self.state);

        info!(
            steps = self.state.steps.len(),
            ok = self.state.error.is_none(),
            "Run finished"
        );
        Ok(())
    }
}
