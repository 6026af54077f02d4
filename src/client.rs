//! HTTP client for the external analysis service.
//!
//! `AnalysisClient` is the seam the workflow talks to; `HttpAnalysisClient`
//! posts JSON to the configured service and `MockAnalysisClient` stands in
//! for it in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::Deserialize;
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::models::{AnalysisRequest, AnalysisResult};

/// Message used when a rejection carries no readable `error` field.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Analysis service is not reachable at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a request into a verdict.
pub trait AnalysisClient: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;

    /// Liveness probe. Returns the service's status line.
    fn health(&self) -> Result<String, ClientError>;
}

/// Error body sent with non-success statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Body of `GET /health`.
#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

/// Blocking HTTP client for the analysis service.
pub struct HttpAnalysisClient {
    config: AnalysisConfig,
    client: reqwest::blocking::Client,
}

impl HttpAnalysisClient {
    /// Build a client for the configured service.
    ///
    /// Only a connect timeout is set; a slow analysis is left to finish.
    pub fn new(config: AnalysisConfig) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connection(self.config.base_url().to_string())
        } else {
            ClientError::HttpClient(e.to_string())
        }
    }
}

/// Pull the `error` field out of a rejection body, if there is one.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

impl AnalysisClient for HttpAnalysisClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        let url = self.config.analyze_url();
        tracing::debug!(url = %url, medicine = %request.medicine, "Submitting analysis");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = rejection_message(&body);
            tracing::info!(status = status.as_u16(), message = %message, "Analysis rejected");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AnalysisResult>()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    fn health(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(self.config.health_url())
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let parsed: HealthBody = response
            .json()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        Ok(parsed.status)
    }
}

// ═══════════════════════════════════════════════════════════
// MockAnalysisClient
// ═══════════════════════════════════════════════════════════

/// Mock client for testing — replays a configurable outcome and records
/// the requests it received.
pub struct MockAnalysisClient {
    outcome: Result<AnalysisResult, ClientError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl MockAnalysisClient {
    pub fn succeeding(result: AnalysisResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    pub fn failing(error: ClientError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<AnalysisResult, ClientError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl AnalysisClient for MockAnalysisClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }

    fn health(&self) -> Result<String, ClientError> {
        Ok("API running".to_string())
    }
}
