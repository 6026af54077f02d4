//! Session-scoped "current result" slot.
//!
//! Holds the verdict behind the report view for as long as that view is
//! relevant. Written only by the workflow on a successful submission;
//! readers get cheap `Arc` handles. Nothing here outlives the process.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::models::AnalysisResult;
use crate::report::{build_report, ReportView};

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Internal lock error")]
    LockPoisoned,
}

#[derive(Debug, Default)]
pub struct ReportSession {
    current: RwLock<Option<Arc<AnalysisResult>>>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the current result, if any.
    pub fn current_result(&self) -> Result<Option<Arc<AnalysisResult>>, SessionError> {
        let guard = self.current.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(guard.clone())
    }

    pub fn has_result(&self) -> bool {
        self.current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Replace the current result and return a handle to it.
    pub(crate) fn store(&self, result: AnalysisResult) -> Result<Arc<AnalysisResult>, SessionError> {
        let result = Arc::new(result);
        let mut guard = self.current.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = Some(Arc::clone(&result));
        Ok(result)
    }

    /// Drop the current result (new case).
    pub(crate) fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.current.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = None;
        Ok(())
    }

    /// Dashboard view of the current result.
    pub fn report(&self) -> Result<Option<ReportView>, SessionError> {
        Ok(self.current_result()?.map(|result| build_report(&result)))
    }
}
