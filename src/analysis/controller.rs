//! Single in-flight request state machine backing the tag view.
//!
//! `submit` hands the text to a worker thread; the outcome travels back over a
//! channel and is applied by `poll` or `wait` on the owning thread.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::display::{opacity, TagDisplayState};
use super::mapper::{ResponseMapper, ToneResponse};
use super::{AnalyzerError, Result, ServiceError, ToneService};
use crate::types::AnalysisResult;

type ServiceOutcome = std::result::Result<Option<ToneResponse>, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed(AnalyzerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dispatched,
    /// A request was already in flight; nothing changed.
    Ignored,
}

/// What the owning thread must do after applying a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// A new result replaced the old one; redraw every tag.
    Updated,
    Failed(AnalyzerError),
}

/// Read-only view of one tag for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TagView {
    pub label: String,
    pub opacity: f64,
}

/// Owns the current analysis and drives one request at a time.
///
/// The service call runs on a worker thread; its outcome is only applied in
/// [`poll`](Self::poll) or [`wait`](Self::wait) on the thread that owns the
/// controller, so result and display state never change underneath a reader.
pub struct AnalysisRequestController {
    service: std::result::Result<Arc<dyn ToneService>, AnalyzerError>,
    mapper: ResponseMapper,
    state: RequestState,
    result: AnalysisResult,
    display: TagDisplayState,
    pending: Option<Receiver<ServiceOutcome>>,
}

impl AnalysisRequestController {
    pub fn new(service: impl ToneService) -> Self {
        Self::from_shared(Arc::new(service))
    }

    pub fn from_shared(service: Arc<dyn ToneService>) -> Self {
        Self::build(Ok(service))
    }

    /// Controller for a session whose credentials could not be resolved;
    /// every non-blank submission fails with `reason`.
    pub fn unconfigured(reason: AnalyzerError) -> Self {
        Self::build(Err(reason))
    }

    fn build(service: std::result::Result<Arc<dyn ToneService>, AnalyzerError>) -> Self {
        Self {
            service,
            mapper: ResponseMapper::new(),
            state: RequestState::Idle,
            result: AnalysisResult::default(),
            display: TagDisplayState::default(),
            pending: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == RequestState::Requesting
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn display(&self) -> &TagDisplayState {
        &self.display
    }

    pub fn submit(&mut self, text: &str) -> Result<SubmitOutcome> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        if self.is_busy() {
            debug!("submission ignored while a tone request is in flight");
            return Ok(SubmitOutcome::Ignored);
        }
        let service = self.service.clone()?;

        let (tx, rx) = channel();
        let payload = text.to_string();
        info!(chars = payload.chars().count(), "dispatching tone request");
        thread::Builder::new()
            .name("tone-request".to_string())
            .spawn(move || {
                let outcome = service.analyze(&payload);
                let _ = tx.send(outcome);
            })
            .map_err(|err| {
                error!(error = %err, "failed to spawn tone request thread");
                AnalyzerError::TransportFailure(err.to_string())
            })?;
        self.pending = Some(rx);
        self.state = RequestState::Requesting;
        Ok(SubmitOutcome::Dispatched)
    }

    /// Applies a finished request if one is ready. Never blocks.
    pub fn poll(&mut self) -> Option<Completion> {
        let outcome = match self.pending.as_ref()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        Some(self.finish(outcome))
    }

    /// Blocks up to `timeout` for the in-flight request to finish.
    pub fn wait(&mut self, timeout: Duration) -> Option<Completion> {
        let outcome = match self.pending.as_ref()?.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Err(worker_lost()),
        };
        Some(self.finish(outcome))
    }

    /// Returns a finished controller to `Idle`, keeping the last result on screen.
    pub fn reset(&mut self) {
        if matches!(
            self.state,
            RequestState::Succeeded | RequestState::Failed(_)
        ) {
            self.state = RequestState::Idle;
        }
    }

    pub fn count(&self) -> usize {
        self.result.len()
    }

    /// # Panics
    /// When `index >= self.count()`.
    pub fn entry_at(&self, index: usize) -> TagView {
        let label = self.display.label_for(index, &self.result);
        TagView {
            label,
            opacity: opacity(self.result.tones()[index].score()),
        }
    }

    /// # Panics
    /// When `index >= self.count()`.
    pub fn toggle(&mut self, index: usize) -> String {
        let label = self.display.toggle(index, &self.result);
        debug!(index, label = %label, "toggled tag");
        label
    }

    fn finish(&mut self, outcome: ServiceOutcome) -> Completion {
        self.pending = None;
        let mapped = outcome
            .map_err(|err| {
                let classified = AnalyzerError::from_transport(&err);
                warn!(error = %err, status = ?err.status, kind = ?classified, "tone request failed");
                classified
            })
            .and_then(|raw| {
                self.mapper.map(raw.as_ref()).map_err(|err| {
                    warn!(error = %err, "tone response could not be mapped");
                    AnalyzerError::from(err)
                })
            });
        match mapped {
            Ok(result) => {
                info!(tones = result.len(), "tone analysis completed");
                self.display.reset(result.len());
                self.result = result;
                self.state = RequestState::Succeeded;
                Completion::Updated
            }
            Err(err) => {
                self.state = RequestState::Failed(err.clone());
                Completion::Failed(err)
            }
        }
    }
}

fn worker_lost() -> ServiceError {
    ServiceError::new("tone request worker exited without a response")
}
