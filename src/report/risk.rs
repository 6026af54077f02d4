//! Overall risk: categorical badge plus the 0–100 score gauge.
//!
//! The badge and the score band are computed independently and may
//! disagree; both are displayed.

use serde::Serialize;

use super::Tone;
use crate::models::RiskLevel;

/// Upper bound of the score gauge.
pub const SCORE_MAX: f64 = 100.0;

/// Start of the cautionary band.
pub const CAUTION_BAND_START: f64 = 25.0;

/// Start of the adverse band.
pub const ADVERSE_BAND_START: f64 = 60.0;

/// Headline badge under the score gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBadge {
    pub level: RiskLevel,
    pub label: &'static str,
    pub tone: Tone,
}

/// Background band of the score gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBand {
    pub start: u8,
    pub end: u8,
    pub tone: Tone,
}

/// Fixed bands drawn behind the score needle.
pub const SCORE_BANDS: [ScoreBand; 3] = [
    ScoreBand { start: 0, end: 25, tone: Tone::Favorable },
    ScoreBand { start: 25, end: 60, tone: Tone::Cautionary },
    ScoreBand { start: 60, end: 100, tone: Tone::Adverse },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGauge {
    /// Score exactly as the service sent it.
    pub raw_score: f64,
    /// Score clamped onto the 0–100 scale for the needle.
    pub display_score: f64,
    /// Band the display score falls in.
    pub band: Tone,
    /// Background bands for the gauge face.
    pub bands: &'static [ScoreBand],
}

/// Classify a risk-level tag. Unknown tags fall back to HIGH RISK.
pub fn classify_risk_level(tag: &str) -> RiskBadge {
    let level = RiskLevel::from_tag(tag);
    if level == RiskLevel::HighRisk && tag != RiskLevel::HighRisk.as_str() {
        tracing::warn!(tag, "Unrecognized risk level, showing HIGH RISK");
    }

    let tone = match level {
        RiskLevel::Safe => Tone::Favorable,
        RiskLevel::Caution => Tone::Cautionary,
        RiskLevel::HighRisk => Tone::Adverse,
    };

    RiskBadge {
        level,
        label: level.as_str(),
        tone,
    }
}

/// Clamp a score onto the gauge. NaN pins to the adverse end.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MAX;
    }
    score.clamp(0.0, SCORE_MAX)
}

/// Band for a score: [0,25) favorable, [25,60) cautionary, [60,100] adverse.
pub fn score_band(score: f64) -> Tone {
    let score = clamp_score(score);
    if score < CAUTION_BAND_START {
        Tone::Favorable
    } else if score < ADVERSE_BAND_START {
        Tone::Cautionary
    } else {
        Tone::Adverse
    }
}

pub fn score_gauge(score: f64) -> ScoreGauge {
    let display_score = clamp_score(score);
    if display_score != score {
        tracing::debug!(score, display_score, "Score outside gauge range, clamped");
    }

    ScoreGauge {
        raw_score: score,
        display_score,
        band: score_band(score),
        bands: &SCORE_BANDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels() {
        let safe = classify_risk_level("SAFE");
        assert_eq!(safe.label, "SAFE");
        assert_eq!(safe.tone, Tone::Favorable);

        let caution = classify_risk_level("CAUTION");
        assert_eq!(caution.label, "CAUTION");
        assert_eq!(caution.tone, Tone::Cautionary);

        let high = classify_risk_level("HIGH RISK");
        assert_eq!(high.label, "HIGH RISK");
        assert_eq!(high.tone, Tone::Adverse);
    }

    #[test]
    fn unknown_tag_falls_back_to_high_risk() {
        let badge = classify_risk_level("UNKNOWN_TAG");
        assert_eq!(badge.level, RiskLevel::HighRisk);
        assert_eq!(badge.label, "HIGH RISK");
        assert_eq!(badge.tone, Tone::Adverse);
        assert_eq!(badge.tone.color(), "#ef4444");
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(score_band(0.0), Tone::Favorable);
        assert_eq!(score_band(24.9), Tone::Favorable);
        assert_eq!(score_band(25.0), Tone::Cautionary);
        assert_eq!(score_band(59.9), Tone::Cautionary);
        assert_eq!(score_band(60.0), Tone::Adverse);
        assert_eq!(score_band(100.0), Tone::Adverse);
    }

    #[test]
    fn band_independent_of_level() {
        // SAFE label with an adverse-band score: both are reported as-is
        let badge = classify_risk_level("SAFE");
        let gauge = score_gauge(80.0);
        assert_eq!(badge.tone, Tone::Favorable);
        assert_eq!(gauge.band, Tone::Adverse);
    }

    #[test]
    fn out_of_range_scores_clamped_for_display() {
        let gauge = score_gauge(135.0);
        assert_eq!(gauge.raw_score, 135.0);
        assert_eq!(gauge.display_score, 100.0);
        assert_eq!(gauge.band, Tone::Adverse);

        let gauge = score_gauge(-5.0);
        assert_eq!(gauge.display_score, 0.0);
        assert_eq!(gauge.band, Tone::Favorable);
    }

    #[test]
    fn nan_score_pins_to_adverse() {
        let gauge = score_gauge(f64::NAN);
        assert_eq!(gauge.display_score, 100.0);
        assert_eq!(gauge.band, Tone::Adverse);
    }

    #[test]
    fn gauge_carries_bands() {
        let gauge = score_gauge(40.0);
        assert_eq!(gauge.bands.len(), 3);
        let current = gauge
            .bands
            .iter()
            .find(|b| f64::from(b.start) <= 40.0 && 40.0 < f64::from(b.end))
            .unwrap();
        assert_eq!(current.tone, gauge.band);
    }

    #[test]
    fn bands_cover_scale() {
        assert_eq!(SCORE_BANDS[0].start, 0);
        assert_eq!(SCORE_BANDS[2].end, 100);
        for pair in SCORE_BANDS.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}
