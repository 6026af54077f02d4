//! Dose spacing check behind the timeline panel.
//!
//! Times are wall-clock HH:MM on a 24h dial. A current time earlier than
//! the previous one means the previous dose was taken before midnight;
//! exactly one day wrap is assumed.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::{ReportError, Tone};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Marker colors for the timeline strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineMarkers {
    pub previous: Tone,
    pub connector: Tone,
    pub current: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpacingAssessment {
    pub previous_time: String,
    pub current_time: String,
    pub min_spacing_hours: f64,
    pub actual_spacing_hours: f64,
    pub violation: bool,
    /// Hours still to wait before the dose would be spaced correctly,
    /// rounded to one decimal. Zero when there is no violation.
    pub remaining_hours: f64,
    pub markers: TimelineMarkers,
}

impl SpacingAssessment {
    /// Actual gap as displayed, e.g. `"4.0h"`.
    pub fn actual_label(&self) -> String {
        format!("{:.1}h", self.actual_spacing_hours)
    }

    /// Required gap as displayed, e.g. `"4h"`.
    pub fn required_label(&self) -> String {
        format!("{}h", self.min_spacing_hours)
    }
}

/// Minutes since midnight for an `HH:MM` string.
pub fn minutes_since_midnight(time: &str) -> Result<i64, ReportError> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| ReportError::InvalidTime(time.to_string()))?;
    Ok(i64::from(parsed.hour()) * 60 + i64::from(parsed.minute()))
}

/// Hours elapsed from `previous` to `current`, wrapping once past midnight.
pub fn elapsed_hours(previous: &str, current: &str) -> Result<f64, ReportError> {
    let mut delta = minutes_since_midnight(current)? - minutes_since_midnight(previous)?;
    if delta < 0 {
        delta += MINUTES_PER_DAY;
    }
    Ok(delta as f64 / 60.0)
}

fn remaining_hours(min_spacing_hours: f64, actual_spacing_hours: f64) -> f64 {
    let remaining = min_spacing_hours - actual_spacing_hours;
    if remaining > 0.0 {
        (remaining * 10.0).round() / 10.0
    } else {
        0.0
    }
}

/// Check a dose against the required spacing.
///
/// Returns `Ok(None)` when there is no previous dose to compare against.
pub fn assess_spacing(
    previous_time: Option<&str>,
    current_time: &str,
    min_spacing_hours: f64,
) -> Result<Option<SpacingAssessment>, ReportError> {
    let Some(previous) = previous_time.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };

    let actual_spacing_hours = elapsed_hours(previous, current_time)?;
    let violation = actual_spacing_hours < min_spacing_hours;

    let markers = TimelineMarkers {
        previous: Tone::Primary,
        connector: if violation { Tone::Adverse } else { Tone::Favorable },
        current: if violation { Tone::Adverse } else { Tone::Primary },
    };

    Ok(Some(SpacingAssessment {
        previous_time: previous.to_string(),
        current_time: current_time.to_string(),
        min_spacing_hours,
        actual_spacing_hours,
        violation,
        remaining_hours: remaining_hours(min_spacing_hours, actual_spacing_hours),
        markers,
    }))
}
