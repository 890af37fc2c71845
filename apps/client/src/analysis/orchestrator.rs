//! Analysis Orchestrator — the dashboard's submit flow.
//!
//! Flow: form.submit → view.begin (in-flight) → AnalysisApi → store result or
//!       error → in-flight cleared → file cleared on success.
//!
//! In-flight is cleared by a drop guard, so it is reset even if the request
//! future is dropped before completing.

use tracing::{info, warn};

use crate::analysis::AnalysisApi;
use crate::api_client::ApiError;
use crate::errors::AnalysisError;
use crate::models::analysis::AnalysisResult;
use crate::upload::form::UploadForm;

// ────────────────────────────────────────────────────────────────────────────
// View state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AnalysisView {
    in_flight: bool,
    error: Option<AnalysisError>,
    result: Option<AnalysisResult>,
}

impl AnalysisView {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Marks a request as in flight and clears the previous error. Returns
    /// `None` when a request is already in flight.
    pub fn begin(&mut self) -> Option<InFlight<'_>> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        Some(InFlight { view: self })
    }

    pub fn reset(&mut self) {
        self.error = None;
        self.result = None;
    }
}

/// An in-flight analysis request. Dropping it clears the in-flight flag.
pub struct InFlight<'a> {
    view: &'a mut AnalysisView,
}

impl InFlight<'_> {
    /// Records the response. Returns whether it succeeded.
    pub fn finish(self, outcome: Result<AnalysisResult, ApiError>) -> bool {
        match outcome {
            Ok(result) => {
                info!("Analysis received: score {}", result.overall_score);
                self.view.result = Some(result);
                true
            }
            Err(e) => {
                warn!("Analysis failed: {e}");
                self.view.error = Some(AnalysisError::from(&e));
                false
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.view.in_flight = false;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dashboard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submission was not allowed (no file, blank role, or already in flight).
    Skipped,
    Succeeded,
    Failed,
}

/// The protected view: upload form plus analysis state.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub form: UploadForm,
    view: AnalysisView,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &AnalysisView {
        &self.view
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(self.view.is_in_flight())
    }

    /// Submits the form to the analysis endpoint with the caller's bearer
    /// token.
    pub async fn submit(&mut self, api: &dyn AnalysisApi, token: Option<&str>) -> SubmitOutcome {
        let Some(payload) = self.form.submit(self.view.is_in_flight()) else {
            return SubmitOutcome::Skipped;
        };
        let Some(flight) = self.view.begin() else {
            return SubmitOutcome::Skipped;
        };

        let outcome = api.analyze_resume(&payload, token).await;
        if !flight.finish(outcome) {
            return SubmitOutcome::Failed;
        }

        self.form.clear_file();
        SubmitOutcome::Succeeded
    }

    /// "Analyze Another Resume": drops the result and error and returns to an
    /// empty form.
    pub fn reset(&mut self) {
        self.view.reset();
        self.form = UploadForm::new();
    }
}
