use serde::{Deserialize, Serialize};

/// Raw dosing context as typed into the form. Numeric fields stay text
/// until `intake::adapt` coerces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoseInput {
    pub medicine: String,
    pub dose: String,
    pub time: String, // HH:MM
    pub previous_time: Option<String>, // HH:MM, empty or null
    pub other_meds: String, // comma-separated
    pub alcohol: bool,
    pub age: Option<String>,
    pub pregnant: bool,
    pub weight: Option<String>,
}

/// Payload posted to the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub medicine: String,
    pub dose: f64,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_time: Option<String>,
    pub other_meds: Vec<String>,
    pub alcohol: bool,
    pub age: Option<f64>,
    pub pregnant: bool,
    pub weight: Option<f64>,
}
