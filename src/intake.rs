//! Form intake — turns raw form fields into the analysis request payload.
//!
//! Pure: no I/O. Blank optional numbers become `None`; co-medications are
//! split on commas, trimmed and stripped of empty entries in input order.

use serde::Serialize;
use thiserror::Error;

use crate::models::{AnalysisRequest, DoseInput};

#[derive(Error, Debug, PartialEq)]
pub enum IntakeError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} cannot be negative ({value})")]
    Negative { field: &'static str, value: f64 },
}

/// Build the request payload from the form state.
pub fn adapt(input: &DoseInput) -> Result<AnalysisRequest, IntakeError> {
    let dose = parse_optional_number("dose", Some(input.dose.as_str()))?
        .ok_or(IntakeError::Missing { field: "dose" })?;
    let age = parse_optional_number("age", input.age.as_deref())?;
    let weight = parse_optional_number("weight", input.weight.as_deref())?;

    let previous_time = input
        .previous_time
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);

    Ok(AnalysisRequest {
        medicine: input.medicine.clone(),
        dose,
        time: input.time.clone(),
        previous_time,
        other_meds: split_other_meds(&input.other_meds),
        alcohol: input.alcohol,
        age,
        pregnant: input.pregnant,
        weight,
    })
}

/// Split a comma-separated co-medication field.
pub fn split_other_meds(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_optional_number(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<f64>, IntakeError> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let value = text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IntakeError::NotANumber {
            field,
            value: text.to_string(),
        })?;

    if value < 0.0 {
        return Err(IntakeError::Negative { field, value });
    }
    Ok(Some(value))
}

// ═══════════════════════════════════════════
// Presets — common risk situations
// ═══════════════════════════════════════════

/// A canned form state offered as a one-tap example.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub input: DoseInput,
}

#[allow(clippy::too_many_arguments)]
fn preset_input(
    medicine: &str,
    dose: &str,
    time: &str,
    previous_time: &str,
    other_meds: &str,
    alcohol: bool,
    age: &str,
    weight: &str,
) -> DoseInput {
    DoseInput {
        medicine: medicine.into(),
        dose: dose.into(),
        time: time.into(),
        previous_time: Some(previous_time.into()),
        other_meds: other_meds.into(),
        alcohol,
        age: Some(age.into()),
        pregnant: false,
        weight: Some(weight.into()),
    }
}

/// The common risk situations shown under the form.
pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Standard Adult Dose",
            input: preset_input("paracetamol", "500", "14:00", "08:00", "", false, "30", "70"),
        },
        Preset {
            name: "Child Overdose Risk",
            input: preset_input("paracetamol", "500", "14:00", "", "", false, "6", "20"),
        },
        Preset {
            name: "Paracetamol + Alcohol",
            input: preset_input("paracetamol", "1000", "22:00", "16:00", "", true, "40", "80"),
        },
        Preset {
            name: "Multiple Painkillers Together",
            input: preset_input("ibuprofen", "400", "14:00", "08:00", "aspirin", false, "25", "65"),
        },
        Preset {
            name: "Hidden Paracetamol",
            input: preset_input("crocin", "500", "14:00", "10:00", "dolo_650", false, "30", "70"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> DoseInput {
        DoseInput {
            medicine: "paracetamol".into(),
            dose: "500".into(),
            time: "14:00".into(),
            previous_time: Some("08:00".into()),
            other_meds: String::new(),
            alcohol: false,
            age: Some("30".into()),
            pregnant: false,
            weight: Some("70".into()),
        }
    }

    #[test]
    fn other_meds_trimmed_and_empties_dropped() {
        let input = DoseInput {
            other_meds: " aspirin ,, ibuprofen ".into(),
            ..base_input()
        };
        let request = adapt(&input).unwrap();
        assert_eq!(request.other_meds, vec!["aspirin", "ibuprofen"]);
    }

    #[test]
    fn other_meds_preserve_order_and_case() {
        assert_eq!(
            split_other_meds("Dolo_650, aspirin,Crocin"),
            vec!["Dolo_650", "aspirin", "Crocin"]
        );
        assert!(split_other_meds("").is_empty());
        assert!(split_other_meds(" , ,").is_empty());
    }

    #[test]
    fn empty_age_is_null() {
        let input = DoseInput {
            age: Some(String::new()),
            ..base_input()
        };
        assert_eq!(adapt(&input).unwrap().age, None);

        let input = DoseInput {
            age: None,
            ..base_input()
        };
        assert_eq!(adapt(&input).unwrap().age, None);
    }

    #[test]
    fn numeric_age_parsed() {
        let input = DoseInput {
            age: Some("6".into()),
            ..base_input()
        };
        assert_eq!(adapt(&input).unwrap().age, Some(6.0));
    }

    #[test]
    fn blank_weight_is_null() {
        let input = DoseInput {
            weight: Some("  ".into()),
            ..base_input()
        };
        assert_eq!(adapt(&input).unwrap().weight, None);
    }

    #[test]
    fn dose_parsed_as_number() {
        let request = adapt(&base_input()).unwrap();
        assert_eq!(request.dose, 500.0);
        assert_eq!(request.medicine, "paracetamol");
        assert_eq!(request.time, "14:00");
        assert_eq!(request.previous_time.as_deref(), Some("08:00"));
    }

    #[test]
    fn missing_dose_rejected() {
        let input = DoseInput {
            dose: String::new(),
            ..base_input()
        };
        assert_eq!(
            adapt(&input).unwrap_err(),
            IntakeError::Missing { field: "dose" }
        );
    }

    #[test]
    fn non_numeric_dose_rejected() {
        let input = DoseInput {
            dose: "five hundred".into(),
            ..base_input()
        };
        assert!(matches!(
            adapt(&input).unwrap_err(),
            IntakeError::NotANumber { field: "dose", .. }
        ));
    }

    #[test]
    fn negative_weight_rejected() {
        let input = DoseInput {
            weight: Some("-3".into()),
            ..base_input()
        };
        assert!(matches!(
            adapt(&input).unwrap_err(),
            IntakeError::Negative { field: "weight", .. }
        ));
    }

    #[test]
    fn blank_previous_time_is_absent() {
        let input = DoseInput {
            previous_time: Some(String::new()),
            ..base_input()
        };
        assert_eq!(adapt(&input).unwrap().previous_time, None);
    }

    #[test]
    fn flags_pass_through() {
        let input = DoseInput {
            alcohol: true,
            pregnant: true,
            ..base_input()
        };
        let request = adapt(&input).unwrap();
        assert!(request.alcohol);
        assert!(request.pregnant);
    }

    #[test]
    fn request_serializes_flat() {
        let input = DoseInput {
            previous_time: None,
            age: None,
            ..base_input()
        };
        let json = serde_json::to_value(adapt(&input).unwrap()).unwrap();
        assert_eq!(json["dose"], 500.0);
        assert!(json["age"].is_null());
        assert!(json.get("previous_time").is_none());
        assert_eq!(json["other_meds"], serde_json::json!([]));
    }

    #[test]
    fn all_presets_adapt() {
        let presets = presets();
        assert_eq!(presets.len(), 5);
        for preset in &presets {
            assert!(adapt(&preset.input).is_ok(), "preset {} failed", preset.name);
        }
        let child = adapt(&presets[1].input).unwrap();
        assert_eq!(child.previous_time, None);
        assert_eq!(child.age, Some(6.0));
        let hidden = adapt(&presets[4].input).unwrap();
        assert_eq!(hidden.other_meds, vec!["dolo_650"]);
    }
}
