//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default rollover schedule: every day at local midnight.
pub const DEFAULT_ROLLOVER_CRON: &str = "0 0 0 * * *";

/// Runtime configuration for the ritual front-end.
#[derive(Debug, Clone)]
pub struct RitualConfig {
    /// Mood used when the check-in does not supply one.
    pub default_mood: String,
    /// Whether the day-rollover task runs at all.
    pub rollover_enabled: bool,
    /// Cron expression (seconds precision, local time) for the daily reset.
    pub rollover_cron: String,
    /// Pause between meditation lines during progressive reveal.
    pub reveal_delay: Duration,
    /// Directory for daily-rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            default_mood: String::new(),
            rollover_enabled: true,
            rollover_cron: DEFAULT_ROLLOVER_CRON.to_string(),
            reveal_delay: Duration::from_millis(1200),
            log_dir: None,
        }
    }
}

impl RitualConfig {
    /// Load configuration from `RITUAL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_mood = lookup("RITUAL_DEFAULT_MOOD")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.default_mood);

        let rollover_enabled = match lookup("RITUAL_ROLLOVER_ENABLED") {
            Some(raw) => parse_bool("RITUAL_ROLLOVER_ENABLED", &raw)?,
            None => defaults.rollover_enabled,
        };

        let rollover_cron = lookup("RITUAL_ROLLOVER_CRON")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.rollover_cron);
        validate_schedule(&rollover_cron)?;

        let reveal_delay = match lookup("RITUAL_REVEAL_DELAY_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    key: "RITUAL_REVEAL_DELAY_MS".to_string(),
                    message: format!("{e}"),
                })?;
                Duration::from_millis(ms)
            }
            None => defaults.reveal_delay,
        };

        let log_dir = lookup("RITUAL_LOG_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            default_mood,
            rollover_enabled,
            rollover_cron,
            reveal_delay,
            log_dir,
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}

/// Check that `schedule` parses as a cron expression.
pub fn validate_schedule(schedule: &str) -> Result<cron::Schedule, ConfigError> {
    cron::Schedule::from_str(schedule).map_err(|e| ConfigError::InvalidSchedule {
        schedule: schedule.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = RitualConfig::from_lookup(|_| None).unwrap();
        assert!(config.default_mood.is_empty());
        assert!(config.rollover_enabled);
        assert_eq!(config.rollover_cron, DEFAULT_ROLLOVER_CRON);
        assert_eq!(config.reveal_delay, Duration::from_millis(1200));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = RitualConfig::from_lookup(lookup_from(&[
            ("RITUAL_DEFAULT_MOOD", " calm "),
            ("RITUAL_ROLLOVER_ENABLED", "off"),
            ("RITUAL_ROLLOVER_CRON", "0 30 4 * * *"),
            ("RITUAL_REVEAL_DELAY_MS", "0"),
            ("RITUAL_LOG_DIR", "/tmp/ritual-logs"),
        ]))
        .unwrap();

        assert_eq!(config.default_mood, "calm");
        assert!(!config.rollover_enabled);
        assert_eq!(config.rollover_cron, "0 30 4 * * *");
        assert_eq!(config.reveal_delay, Duration::ZERO);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/ritual-logs")));
    }

    #[test]
    fn rejects_bad_delay() {
        let err = RitualConfig::from_lookup(lookup_from(&[("RITUAL_REVEAL_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "RITUAL_REVEAL_DELAY_MS"));
    }

    #[test]
    fn rejects_bad_bool() {
        let err = RitualConfig::from_lookup(lookup_from(&[("RITUAL_ROLLOVER_ENABLED", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_bad_schedule() {
        let err = RitualConfig::from_lookup(lookup_from(&[("RITUAL_ROLLOVER_CRON", "not a cron")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchedule { .. }));
    }

    #[test]
    fn blank_log_dir_is_ignored() {
        let config = RitualConfig::from_lookup(lookup_from(&[("RITUAL_LOG_DIR", "  ")])).unwrap();
        assert!(config.log_dir.is_none());
    }
}
