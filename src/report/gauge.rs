use serde::Serialize;

use super::Tone;
use crate::config::DEFAULT_LOAD_MAX;

/// Load below which an organ is unstressed.
pub const LOAD_CAUTION_FROM: f64 = 4.0;
/// Load from which an organ is considered stressed.
pub const LOAD_ADVERSE_FROM: f64 = 6.0;

/// One organ-load bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadGauge {
    pub title: &'static str,
    pub value: f64,
    pub max: f64,
    /// Bar fill, 0–100.
    pub percentage: f64,
    pub tone: Tone,
}

/// Tier for a load value: < 4 favorable, [4,6) cautionary, ≥ 6 adverse.
pub fn load_tone(value: f64) -> Tone {
    if value < LOAD_CAUTION_FROM {
        Tone::Favorable
    } else if value < LOAD_ADVERSE_FROM {
        Tone::Cautionary
    } else {
        Tone::Adverse
    }
}

/// Bar fill for `value` on a `max` scale, clamped to 0–100.
pub fn load_percentage(value: f64, max: f64) -> f64 {
    let max = if max.is_finite() && max > 0.0 {
        max
    } else {
        tracing::warn!(max, "Invalid gauge maximum, using default");
        DEFAULT_LOAD_MAX
    };

    let percentage = value / max * 100.0;
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

pub fn load_gauge(title: &'static str, value: f64, max: f64) -> LoadGauge {
    LoadGauge {
        title,
        value,
        max,
        percentage: load_percentage(value, max),
        tone: load_tone(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_clamped_at_full_scale() {
        assert_eq!(load_percentage(12.0, 10.0), 100.0);
        assert_eq!(load_percentage(10.0, 10.0), 100.0);
    }

    #[test]
    fn percentage_proportional() {
        assert_eq!(load_percentage(5.0, 10.0), 50.0);
        assert_eq!(load_percentage(0.0, 10.0), 0.0);
        assert_eq!(load_percentage(3.0, 20.0), 15.0);
    }

    #[test]
    fn zero_max_does_not_divide_by_zero() {
        assert_eq!(load_percentage(5.0, 0.0), 50.0);
        assert_eq!(load_percentage(5.0, -1.0), 50.0);
    }

    #[test]
    fn negative_load_floors_at_zero() {
        assert_eq!(load_percentage(-2.0, 10.0), 0.0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(load_tone(3.0), Tone::Favorable);
        assert_eq!(load_tone(3.99), Tone::Favorable);
        assert_eq!(load_tone(4.0), Tone::Cautionary);
        assert_eq!(load_tone(5.99), Tone::Cautionary);
        assert_eq!(load_tone(6.0), Tone::Adverse);
        assert_eq!(load_tone(12.0), Tone::Adverse);
    }

    #[test]
    fn gauge_combines_fill_and_tier() {
        let gauge = load_gauge("Liver Load", 12.0, 10.0);
        assert_eq!(gauge.title, "Liver Load");
        assert_eq!(gauge.percentage, 100.0);
        assert_eq!(gauge.tone, Tone::Adverse);
        assert_eq!(gauge.tone.color(), "#ef4444");
    }
}
