//! Submission workflow: form → service → report.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ ResultReady ──new case──▶ Idle
//!                       └────err────▶ Idle (stored result untouched)
//! ```
//!
//! Only one submission may be in flight. A second `submit` while one is
//! running is rejected immediately, never queued. The busy guard is held
//! for the whole exchange and released on drop, whatever the outcome.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::client::{AnalysisClient, ClientError};
use crate::intake::{self, IntakeError};
use crate::models::{AnalysisRequest, AnalysisResult, DoseInput};
use crate::report::ReportView;
use crate::session::{ReportSession, SessionError};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Submitting,
    ResultReady,
}

/// Which page the display layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Input,
    Report,
}

/// The submission currently in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSubmission {
    pub id: Uuid,
    pub medicine: String,
    /// When the submission started (ISO 8601).
    pub started_at: String,
}

/// Snapshot of the workflow for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStatus {
    pub state: WorkflowState,
    pub view: View,
    pub active: Option<ActiveSubmission>,
    /// Failure notice from the last submission, if it failed.
    pub notice: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum WorkflowError {
    #[error("An analysis is already running")]
    AlreadySubmitting,

    #[error("{0}")]
    Intake(#[from] IntakeError),

    #[error("{0}")]
    Analysis(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal lock error")]
    LockPoisoned,
}

impl WorkflowError {
    /// Human-readable failure notice for the user.
    pub fn notice(&self) -> String {
        match self {
            Self::AlreadySubmitting => "An analysis is already running. Please wait.".to_string(),
            other => format!(
                "Analysis failed: {other}. Check if the medicine name is recognized."
            ),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// AnalysisWorkflow
// ═══════════════════════════════════════════════════════════

pub struct AnalysisWorkflow<C: AnalysisClient> {
    client: C,
    /// Exclusive submission lock — held for the whole exchange.
    busy: Mutex<()>,
    status: Mutex<WorkflowStatus>,
    session: ReportSession,
}

impl<C: AnalysisClient> AnalysisWorkflow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            busy: Mutex::new(()),
            status: Mutex::new(WorkflowStatus {
                state: WorkflowState::Idle,
                view: View::Input,
                active: None,
                notice: None,
            }),
            session: ReportSession::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Session handle for the presentation layer.
    pub fn session(&self) -> &ReportSession {
        &self.session
    }

    pub fn status(&self) -> Result<WorkflowStatus, WorkflowError> {
        Ok(self.lock_status()?.clone())
    }

    pub fn state(&self) -> Result<WorkflowState, WorkflowError> {
        Ok(self.lock_status()?.state)
    }

    /// Is a submission in flight?
    pub fn is_busy(&self) -> bool {
        matches!(self.busy.try_lock(), Err(TryLockError::WouldBlock))
    }

    pub fn current_result(&self) -> Result<Option<Arc<AnalysisResult>>, WorkflowError> {
        Ok(self.session.current_result()?)
    }

    /// Dashboard view of the current result.
    pub fn report(&self) -> Result<Option<ReportView>, WorkflowError> {
        Ok(self.session.report()?)
    }

    /// Submit the form.
    ///
    /// On success the result becomes the session's current result and the
    /// view switches to the report. On failure the workflow returns to
    /// `Idle`, the stored result is left as it was, and the failure notice
    /// is recorded in the status. The submission's own error is returned
    /// even if the status could not be updated.
    pub fn submit(&self, input: &DoseInput) -> Result<Arc<AnalysisResult>, WorkflowError> {
        let _guard = self.begin(input)?;

        match self.run(input) {
            Ok(result) => {
                let mut status = self.lock_status()?;
                status.state = WorkflowState::ResultReady;
                status.view = View::Report;
                status.active = None;
                status.notice = None;
                tracing::info!(
                    medicine = %input.medicine,
                    risk_level = %result.risk_level,
                    score = result.score,
                    "Analysis complete"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(medicine = %input.medicine, error = %e, "Analysis failed");
                match self.lock_status() {
                    Ok(mut status) => {
                        status.state = WorkflowState::Idle;
                        status.view = View::Input;
                        status.active = None;
                        status.notice = Some(e.notice());
                    }
                    Err(lock_err) => {
                        tracing::error!(error = %lock_err, "Failure notice not recorded");
                    }
                }
                Err(e)
            }
        }
    }

    /// Return to the form keeping the stored result, e.g. to adjust a
    /// field and resubmit.
    pub fn back_to_form(&self) -> Result<(), WorkflowError> {
        let mut status = self.lock_status()?;
        status.view = View::Input;
        status.notice = None;
        Ok(())
    }

    /// Start over: drop the stored result and go back to the form.
    ///
    /// A submission still in flight is not cancelled; it may still land.
    pub fn start_new_case(&self) -> Result<(), WorkflowError> {
        self.session.clear()?;
        let mut status = self.lock_status()?;
        if status.state != WorkflowState::Submitting {
            status.state = WorkflowState::Idle;
        }
        status.view = View::Input;
        status.notice = None;
        tracing::debug!("New case started, stored result cleared");
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────

    fn run(&self, input: &DoseInput) -> Result<Arc<AnalysisResult>, WorkflowError> {
        let request = intake::adapt(input)?;
        let mut result = self.client.analyze(&request)?;
        echo_dose_times(&mut result, &request);
        Ok(self.session.store(result)?)
    }

    /// Take the busy lock and move to `Submitting`.
    fn begin(&self, input: &DoseInput) -> Result<SubmissionGuard<'_>, WorkflowError> {
        let guard = match self.busy.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                tracing::debug!(medicine = %input.medicine, "Submission rejected, already running");
                return Err(WorkflowError::AlreadySubmitting);
            }
            Err(TryLockError::Poisoned(_)) => return Err(WorkflowError::LockPoisoned),
        };

        let submission = ActiveSubmission {
            id: Uuid::new_v4(),
            medicine: input.medicine.clone(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };
        tracing::info!(id = %submission.id, medicine = %submission.medicine, "Submitting analysis");

        let mut status = self.lock_status()?;
        status.state = WorkflowState::Submitting;
        status.active = Some(submission);
        status.notice = None;

        Ok(SubmissionGuard { _guard: guard })
    }

    fn lock_status(&self) -> Result<MutexGuard<'_, WorkflowStatus>, WorkflowError> {
        self.status.lock().map_err(|_| WorkflowError::LockPoisoned)
    }
}

/// The service does not echo dose times back; the spacing timeline needs
/// them, so fill whatever the response left out from the request.
fn echo_dose_times(result: &mut AnalysisResult, request: &AnalysisRequest) {
    if result.time.trim().is_empty() {
        result.time = request.time.clone();
    }
    if result.previous_time.is_none() {
        result.previous_time = request.previous_time.clone();
    }
}

/// RAII token for the busy lock. Dropping it frees the workflow for the
/// next submission.
struct SubmissionGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
