use std::env;

use crate::services::insight_policy::{InsightPolicy, PolicyError, PolicyVersion};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,

    pub policy: InsightPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, PolicyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparseable numeric overrides
    /// fall back to the preset value; an invalid final policy is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PolicyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version: PolicyVersion = lookup("INSIGHT_POLICY")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<PolicyVersion>())
            .transpose()?
            .unwrap_or(PolicyVersion::Current);

        let preset = InsightPolicy::for_version(version);
        let policy = InsightPolicy {
            min_entries: parse_or(&lookup, "INSIGHT_MIN_ENTRIES", preset.min_entries),
            strong_positive_threshold: parse_or(
                &lookup,
                "INSIGHT_POSITIVE_THRESHOLD",
                preset.strong_positive_threshold,
            ),
            strong_negative_threshold: parse_or(
                &lookup,
                "INSIGHT_NEGATIVE_THRESHOLD",
                preset.strong_negative_threshold,
            ),
            alignment_tolerance_pct: parse_or(
                &lookup,
                "INSIGHT_ALIGNMENT_TOLERANCE",
                preset.alignment_tolerance_pct,
            ),
            ..preset
        };
        policy.validate()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 8080),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            policy,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, PolicyError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.policy, InsightPolicy::current());
    }

    #[test]
    fn test_legacy_preset_with_override() {
        let config = config_from(&[
            ("INSIGHT_POLICY", "legacy"),
            ("INSIGHT_POSITIVE_THRESHOLD", "0.4"),
        ])
        .unwrap();
        assert_eq!(config.policy.version, PolicyVersion::Legacy);
        assert_eq!(config.policy.min_entries, 1);
        assert_eq!(config.policy.strong_positive_threshold, 0.4);
        assert!(!config.policy.mood_prefix);
    }

    #[test]
    fn test_unparseable_override_uses_preset() {
        let config = config_from(&[("INSIGHT_MIN_ENTRIES", "lots"), ("PORT", "abc")]).unwrap();
        assert_eq!(config.policy.min_entries, 2);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_unknown_policy_version_fails() {
        let err = config_from(&[("INSIGHT_POLICY", "v9")]).unwrap_err();
        assert_eq!(err, PolicyError::UnknownVersion("v9".into()));
    }

    #[test]
    fn test_invalid_override_fails() {
        let err = config_from(&[("INSIGHT_MIN_ENTRIES", "0")]).unwrap_err();
        assert_eq!(err, PolicyError::ZeroMinEntries);
    }

    #[test]
    fn test_cors_origins_split() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:19006, https://app.moodmate.io,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:19006", "https://app.moodmate.io"]
        );
    }
}
