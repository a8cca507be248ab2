use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum history length before a correlation is computed
pub const DEFAULT_MIN_ENTRIES: usize = 2;
pub const LEGACY_MIN_ENTRIES: usize = 1;

/// Coefficient strictly above this is a strong positive link
pub const STRONG_POSITIVE_THRESHOLD: f64 = 0.5;
/// Coefficient strictly below this is a strong inverse link
pub const STRONG_NEGATIVE_THRESHOLD: f64 = -0.3;
pub const LEGACY_NEGATIVE_THRESHOLD: f64 = -0.5;

/// Max percentage gap between emoji mood and SHS to count as aligned
pub const ALIGNMENT_TOLERANCE_PCT: f64 = 15.0;

/// Mood scores at or below this get the low-mood sentence
pub const LOW_MOOD_MAX: i32 = 2;
pub const MAX_MOOD: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVersion {
    /// Single-entry minimum, -0.5 negative cutoff, no mood opener
    Legacy,
    Current,
}

impl PolicyVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyVersion::Legacy => "legacy",
            PolicyVersion::Current => "current",
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PolicyVersion::Legacy),
            "current" => Ok(PolicyVersion::Current),
            other => Err(PolicyError::UnknownVersion(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PolicyError {
    #[error("Unknown insight policy version: {0}")]
    UnknownVersion(String),

    #[error("min_entries must be at least 1")]
    ZeroMinEntries,

    #[error("Threshold {0} is outside [-1, 1]")]
    ThresholdOutOfRange(f64),

    #[error("Positive threshold {positive} must be greater than negative threshold {negative}")]
    InvertedThresholds { positive: f64, negative: f64 },

    #[error("Alignment tolerance must be a positive number, got {0}")]
    InvalidTolerance(f64),
}

/// Tunable rules for turning a mood history into an insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPolicy {
    pub version: PolicyVersion,
    pub min_entries: usize,
    pub strong_positive_threshold: f64,
    pub strong_negative_threshold: f64,
    pub alignment_tolerance_pct: f64,
    pub mood_prefix: bool,
}

impl InsightPolicy {
    pub fn current() -> Self {
        Self {
            version: PolicyVersion::Current,
            min_entries: DEFAULT_MIN_ENTRIES,
            strong_positive_threshold: STRONG_POSITIVE_THRESHOLD,
            strong_negative_threshold: STRONG_NEGATIVE_THRESHOLD,
            alignment_tolerance_pct: ALIGNMENT_TOLERANCE_PCT,
            mood_prefix: true,
        }
    }

    pub fn legacy() -> Self {
        Self {
            version: PolicyVersion::Legacy,
            min_entries: LEGACY_MIN_ENTRIES,
            strong_positive_threshold: STRONG_POSITIVE_THRESHOLD,
            strong_negative_threshold: LEGACY_NEGATIVE_THRESHOLD,
            alignment_tolerance_pct: ALIGNMENT_TOLERANCE_PCT,
            mood_prefix: false,
        }
    }

    pub fn for_version(version: PolicyVersion) -> Self {
        match version {
            PolicyVersion::Legacy => Self::legacy(),
            PolicyVersion::Current => Self::current(),
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_entries == 0 {
            return Err(PolicyError::ZeroMinEntries);
        }
        for t in [self.strong_positive_threshold, self.strong_negative_threshold] {
            if !(-1.0..=1.0).contains(&t) {
                return Err(PolicyError::ThresholdOutOfRange(t));
            }
        }
        if self.strong_positive_threshold <= self.strong_negative_threshold {
            return Err(PolicyError::InvertedThresholds {
                positive: self.strong_positive_threshold,
                negative: self.strong_negative_threshold,
            });
        }
        if !self.alignment_tolerance_pct.is_finite() || self.alignment_tolerance_pct <= 0.0 {
            return Err(PolicyError::InvalidTolerance(self.alignment_tolerance_pct));
        }
        Ok(())
    }
}

impl Default for InsightPolicy {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(InsightPolicy::current().validate(), Ok(()));
        assert_eq!(InsightPolicy::legacy().validate(), Ok(()));
        assert_eq!(InsightPolicy::default(), InsightPolicy::current());
    }

    #[test]
    fn test_version_parse() {
        assert_eq!("legacy".parse::<PolicyVersion>(), Ok(PolicyVersion::Legacy));
        assert_eq!(" Current ".parse::<PolicyVersion>(), Ok(PolicyVersion::Current));
        assert!("v2".parse::<PolicyVersion>().is_err());
    }

    #[test]
    fn test_rejects_zero_min_entries() {
        let policy = InsightPolicy { min_entries: 0, ..InsightPolicy::current() };
        assert_eq!(policy.validate(), Err(PolicyError::ZeroMinEntries));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let policy = InsightPolicy {
            strong_positive_threshold: -0.4,
            strong_negative_threshold: 0.4,
            ..InsightPolicy::current()
        };
        assert!(matches!(policy.validate(), Err(PolicyError::InvertedThresholds { .. })));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let policy = InsightPolicy { strong_positive_threshold: 1.5, ..InsightPolicy::current() };
        assert_eq!(policy.validate(), Err(PolicyError::ThresholdOutOfRange(1.5)));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let policy = InsightPolicy { alignment_tolerance_pct: 0.0, ..InsightPolicy::current() };
        assert_eq!(policy.validate(), Err(PolicyError::InvalidTolerance(0.0)));
    }

    #[test]
    fn test_policy_serializes_version_lowercase() {
        let json = serde_json::to_value(InsightPolicy::legacy()).unwrap();
        assert_eq!(json["version"], "legacy");
        assert_eq!(json["min_entries"], 1);
    }
}
