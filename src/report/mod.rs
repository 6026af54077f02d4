//! Report view-model — everything the dashboard needs for one result.
//!
//! `build_report` runs every view computer over an `AnalysisResult` and
//! returns a serializable `ReportView`. It never fails: a timeline that
//! cannot be computed is logged and left out.

pub mod gauge;
pub mod issues;
pub mod risk;
pub mod spacing;

pub use gauge::*;
pub use issues::*;
pub use risk::*;
pub use spacing::*;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::DEFAULT_LOAD_MAX;
use crate::models::AnalysisResult;

#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("Invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
}

// ═══════════════════════════════════════════════════════════
// Tone — shared color vocabulary
// ═══════════════════════════════════════════════════════════

/// Semantic color used across gauges, badges and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Favorable,
    Cautionary,
    Adverse,
    /// Brand color for neutral markers.
    Primary,
}

impl Tone {
    /// Foreground color.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Favorable => "#22c55e",
            Self::Cautionary => "#f59e0b",
            Self::Adverse => "#ef4444",
            Self::Primary => "#ef6a67",
        }
    }

    /// Light background variant (score gauge bands).
    pub fn tint(&self) -> &'static str {
        match self {
            Self::Favorable => "#dcfce7",
            Self::Cautionary => "#fef3c7",
            Self::Adverse => "#fee2e2",
            Self::Primary => "#fff9f9",
        }
    }
}

// ═══════════════════════════════════════════════════════════
// ReportView
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    /// Short display reference for the report header.
    pub report_id: String,
    pub badge: RiskBadge,
    pub score: ScoreGauge,
    pub liver: LoadGauge,
    pub kidney: LoadGauge,
    pub stomach: LoadGauge,
    pub issues: Vec<IssueCard>,
    /// Set when `issues` is empty.
    pub no_issues_notice: Option<&'static str>,
    pub guidance: Vec<String>,
    pub explanation: Option<String>,
    pub spacing: Option<SpacingAssessment>,
}

/// Nine-character uppercase reference, e.g. `3F2A9C1B0`.
pub fn new_report_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_uppercase()
}

/// Build the dashboard view for a result.
pub fn build_report(result: &AnalysisResult) -> ReportView {
    let issues = issue_cards(&result.conflicts);
    let no_issues_notice = issues.is_empty().then_some(NO_CONFLICTS_NOTICE);

    let spacing = match assess_spacing(
        result.previous_time.as_deref(),
        &result.time,
        result.min_spacing,
    ) {
        Ok(spacing) => spacing,
        Err(e) => {
            tracing::warn!(error = %e, "Dose spacing could not be assessed, timeline omitted");
            None
        }
    };

    let guidance = result
        .guidance
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect();

    let explanation = result
        .ai_explanation
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string);

    ReportView {
        report_id: new_report_id(),
        badge: classify_risk_level(&result.risk_level),
        score: score_gauge(result.score),
        liver: load_gauge("Liver Load", result.liver_load, DEFAULT_LOAD_MAX),
        kidney: load_gauge("Kidney Load", result.kidney_load, DEFAULT_LOAD_MAX),
        stomach: load_gauge("Stomach Risk", result.stomach_risk, DEFAULT_LOAD_MAX),
        issues,
        no_issues_notice,
        guidance,
        explanation,
        spacing,
    }
}
