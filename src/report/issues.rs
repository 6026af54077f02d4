use serde::Serialize;

use crate::models::{Issue, Severity};

/// Icon drawn at the start of an issue card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueIcon {
    AlertCircle,
    AlertTriangle,
    Info,
}

/// Card styling for one severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueTier {
    pub severity: Severity,
    pub icon: IssueIcon,
    pub background: &'static str,
    pub border: &'static str,
    pub text_color: &'static str,
}

const CRITICAL_TIER: IssueTier = IssueTier {
    severity: Severity::Critical,
    icon: IssueIcon::AlertCircle,
    background: "#fee2e2",
    border: "#f87171",
    text_color: "#991b1b",
};

const WARNING_TIER: IssueTier = IssueTier {
    severity: Severity::Warning,
    icon: IssueIcon::AlertTriangle,
    background: "#ffedd5",
    border: "#fb923c",
    text_color: "#9a3412",
};

const INFO_TIER: IssueTier = IssueTier {
    severity: Severity::Info,
    icon: IssueIcon::Info,
    background: "#f1f5f9",
    border: "#cbd5e1",
    text_color: "#334155",
};

/// Shown in place of the card list when nothing was flagged.
pub const NO_CONFLICTS_NOTICE: &str = "No safety conflicts detected.";

pub fn issue_tier(severity: Severity) -> IssueTier {
    match severity {
        Severity::Critical => CRITICAL_TIER,
        Severity::Warning => WARNING_TIER,
        Severity::Info => INFO_TIER,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueCard {
    pub risk: String,
    pub tier: IssueTier,
}

/// Cards in the order the service flagged them.
pub fn issue_cards(conflicts: &[Issue]) -> Vec<IssueCard> {
    conflicts
        .iter()
        .map(|issue| IssueCard {
            risk: issue.risk.clone(),
            tier: issue_tier(issue.severity),
        })
        .collect()
}
