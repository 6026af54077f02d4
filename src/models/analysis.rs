use serde::{Deserialize, Deserializer, Serialize};

use super::enums::Severity;
use crate::config::DEFAULT_MIN_SPACING_HOURS;

/// Verdict returned by the analysis service for one submission.
///
/// Optional fields fall back to defaults so a sparse response still
/// yields a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_level: String,
    pub liver_load: f64,
    pub kidney_load: f64,
    pub stomach_risk: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conflicts: Vec<Issue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guidance: Vec<String>,
    #[serde(default)]
    pub ai_explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default)]
    pub previous_time: Option<String>,
    #[serde(default = "default_min_spacing", deserialize_with = "min_spacing_or_default")]
    pub min_spacing: f64,
}

/// One flagged safety concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(alias = "text")]
    pub risk: String,
    #[serde(default, deserialize_with = "severity_from_wire")]
    pub severity: Severity,
}

impl Issue {
    pub fn new(risk: impl Into<String>, severity: Severity) -> Self {
        Self {
            risk: risk.into(),
            severity,
        }
    }
}

fn default_min_spacing() -> f64 {
    DEFAULT_MIN_SPACING_HOURS
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `min_spacing: null` and `0` both mean "not provided".
fn min_spacing_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(match value {
        Some(hours) if hours > 0.0 => hours,
        _ => DEFAULT_MIN_SPACING_HOURS,
    })
}

/// Either severity encoding seen on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireSeverity {
    Score(f64),
    Tag(String),
}

fn severity_from_wire<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<WireSeverity>::deserialize(deserializer)?;
    Ok(match value {
        Some(WireSeverity::Score(score)) => Severity::from_score(score),
        Some(WireSeverity::Tag(tag)) => Severity::from_tag(&tag),
        None => Severity::default(),
    })
}
