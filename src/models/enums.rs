use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The wire spelling doubles as the serde name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(RiskLevel {
    Safe => "SAFE",
    Caution => "CAUTION",
    HighRisk => "HIGH RISK",
});

str_enum!(Severity {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

// Legacy tag spelling used by older issue payloads.
str_enum!(LegacySeverityTag {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Numeric severity at or above which an issue is critical.
pub const CRITICAL_SEVERITY: f64 = 5.0;
/// Numeric severity at or above which an issue is a warning.
pub const WARNING_SEVERITY: f64 = 4.0;

impl RiskLevel {
    /// Classify a free-form tag. Anything unrecognized is treated as
    /// `HighRisk`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::HighRisk)
    }
}

impl Severity {
    /// Map the engine's numeric scale onto the canonical tiers.
    /// NaN lands in `Info`, as every comparison against it fails.
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_SEVERITY {
            Self::Critical
        } else if score >= WARNING_SEVERITY {
            Self::Warning
        } else {
            Self::Info
        }
    }

    /// Map a textual tag onto the canonical tiers.
    ///
    /// Accepts the canonical names, the legacy high/medium/low tags and
    /// finite numeric strings. Unrecognized tags, `NaN` and infinities
    /// included, resolve to `Critical`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        if let Ok(canonical) = normalized.parse::<Severity>() {
            return canonical;
        }
        if let Ok(legacy) = normalized.parse::<LegacySeverityTag>() {
            return legacy.into();
        }
        if let Some(score) = normalized.parse::<f64>().ok().filter(|s| s.is_finite()) {
            return Self::from_score(score);
        }
        Self::Critical
    }
}

impl From<LegacySeverityTag> for Severity {
    fn from(tag: LegacySeverityTag) -> Self {
        match tag {
            LegacySeverityTag::High => Self::Critical,
            LegacySeverityTag::Medium => Self::Warning,
            LegacySeverityTag::Low => Self::Info,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_round_trips_known_tags() {
        for level in [RiskLevel::Safe, RiskLevel::Caution, RiskLevel::HighRisk] {
            assert_eq!(RiskLevel::from_tag(level.as_str()), level);
        }
    }

    #[test]
    fn unknown_risk_tag_is_high_risk() {
        assert_eq!(RiskLevel::from_tag("UNKNOWN_TAG"), RiskLevel::HighRisk);
        assert_eq!(RiskLevel::from_tag(""), RiskLevel::HighRisk);
        // Tags are matched exactly
        assert_eq!(RiskLevel::from_tag("safe"), RiskLevel::HighRisk);
    }

    #[test]
    fn risk_level_parse_error_names_field() {
        let err = "MAYBE".parse::<RiskLevel>().unwrap_err();
        assert!(err.to_string().contains("RiskLevel"));
        assert!(err.to_string().contains("MAYBE"));
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(Severity::from_score(10.0), Severity::Critical);
        assert_eq!(Severity::from_score(5.0), Severity::Critical);
        assert_eq!(Severity::from_score(4.9), Severity::Warning);
        assert_eq!(Severity::from_score(4.0), Severity::Warning);
        assert_eq!(Severity::from_score(3.0), Severity::Info);
        assert_eq!(Severity::from_score(f64::NAN), Severity::Info);
    }

    #[test]
    fn legacy_tags_normalize() {
        assert_eq!(Severity::from_tag("high"), Severity::Critical);
        assert_eq!(Severity::from_tag("Medium"), Severity::Warning);
        assert_eq!(Severity::from_tag(" low "), Severity::Info);
    }

    #[test]
    fn canonical_and_numeric_tags_normalize() {
        assert_eq!(Severity::from_tag("warning"), Severity::Warning);
        assert_eq!(Severity::from_tag("5"), Severity::Critical);
        assert_eq!(Severity::from_tag("2"), Severity::Info);
    }

    #[test]
    fn unknown_severity_tag_is_critical() {
        assert_eq!(Severity::from_tag("severe-ish"), Severity::Critical);
        assert_eq!(Severity::from_tag("NaN"), Severity::Critical);
        assert_eq!(Severity::from_tag("inf"), Severity::Critical);
        assert_eq!(Severity::from_tag("-inf"), Severity::Critical);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let json = serde_json::to_string(&RiskLevel::HighRisk).unwrap();
        assert_eq!(json, "\"HIGH RISK\"");
    }
}
