//! Firm-analysis polling workflow.
//!
//! Submits a URL/name/email analysis job, then tracks it on a fixed cadence
//! until the server reports a terminal status. A failed poll request is a
//! transient transport problem and keeps the loop alive; a job reaching
//! `failed` is a definitive outcome and stops it.

use growlaw_client::AnalysisApi;
use growlaw_model::{AnalysisJob, AnalysisRequest};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Fixed cadence between status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
const SUBMIT_FALLBACK: &str = "Failed to start analysis";
const POLL_FAILED_MESSAGE: &str = "Failed to check analysis status";

/// The submitted form fields, kept so `reset` can clear them atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisForm {
    pub firm_url: String,
    pub firm_name: String,
    pub email: String,
}

/// State machine for one firm-analysis job.
pub struct AnalysisWorkflow<A> {
    api: A,
    form: AnalysisForm,
    job: Option<AnalysisJob>,
    error: Option<String>,
}

impl<A: AnalysisApi> AnalysisWorkflow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: AnalysisForm::default(),
            job: None,
            error: None,
        }
    }

    pub fn form(&self) -> &AnalysisForm {
        &self.form
    }

    pub fn job(&self) -> Option<&AnalysisJob> {
        self.job.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a new analysis job.
    ///
    /// All three fields are required; a missing one blocks the submission
    /// without touching the network. On success the returned job replaces
    /// any prior one; on failure the server's message is surfaced and
    /// nothing else changes.
    pub async fn submit(&mut self, firm_url: &str, firm_name: &str, email: &str) {
        self.error = None;

        if firm_url.trim().is_empty() || firm_name.trim().is_empty() || email.trim().is_empty() {
            self.error = Some(MISSING_FIELDS_MESSAGE.to_string());
            return;
        }

        self.form = AnalysisForm {
            firm_url: firm_url.to_string(),
            firm_name: firm_name.to_string(),
            email: email.to_string(),
        };
        self.job = None;

        let request = AnalysisRequest {
            firm_url: self.form.firm_url.clone(),
            firm_name: self.form.firm_name.clone(),
            email: self.form.email.clone(),
        };

        match self.api.create_analysis(&request).await {
            Ok(job) => self.job = Some(job),
            Err(err) => self.error = Some(err.user_message(SUBMIT_FALLBACK)),
        }
    }

    /// Whether the job still needs polling.
    pub fn is_polling(&self) -> bool {
        self.job
            .as_ref()
            .is_some_and(|job| job.status == growlaw_model::JobStatus::Processing)
    }

    /// Fetch the job's current state once.
    ///
    /// A transport failure records a transient message and leaves the job
    /// untouched; a job response clears it. Responses for any job other than
    /// the active one are discarded.
    pub async fn poll_once(&mut self) {
        let Some(current) = &self.job else {
            return;
        };
        if current.status.is_terminal() {
            return;
        }
        let job_id = current.job_id.clone();

        match self.api.get_analysis(&job_id).await {
            Ok(update) => self.apply_update(update),
            Err(err) => {
                tracing::debug!(job_id = %job_id, error = %err, "status poll failed");
                self.error = Some(POLL_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn apply_update(&mut self, update: AnalysisJob) {
        match &self.job {
            Some(current) if current.job_id == update.job_id => {
                self.error = None;
                self.job = Some(update);
            }
            _ => {
                // The user has moved on; drop the stale response.
                tracing::debug!(job_id = %update.job_id, "discarding stale poll response");
            }
        }
    }

    /// Poll every `POLL_INTERVAL` while the job is processing.
    ///
    /// Returns as soon as the status is terminal or no job is active.
    /// Sequential awaits mean at most one outstanding poll; dropping the
    /// returned future cancels the timer and any in-flight request.
    pub async fn track(&mut self) {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // poll lands one full interval after submission.
        ticker.tick().await;

        while self.is_polling() {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Clear job, error, and form fields; safe to call from any state.
    pub fn reset(&mut self) {
        self.form = AnalysisForm::default();
        self.job = None;
        self.error = None;
    }
}
