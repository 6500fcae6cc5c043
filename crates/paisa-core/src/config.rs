//! Engine configuration
//!
//! All duplicate-detection windows are configurable rather than hard-coded:
//! deployments disagree on how long a resent SMS should be suppressed, so the
//! defaults here are starting points, not requirements.

use chrono::Duration;
use serde::Deserialize;

use crate::error::Result;

/// Tunable thresholds for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retention window of the in-memory receive-time duplicate cache
    pub cache_window: Duration,
    /// Look-back window for the persisted duplicate check
    pub persisted_window: Duration,
    /// Tight window for the no-reference fallback duplicate rule
    /// (sender + amount + counterparty equality)
    pub fallback_match_window: Duration,
    /// Amount tolerance for the fallback duplicate rule
    pub amount_tolerance: f64,
    /// Smallest numeric token the fallback amount scan will consider
    pub min_plausible_amount: f64,
    /// Largest numeric token the fallback amount scan will consider
    pub max_plausible_amount: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_window: Duration::minutes(30),
            persisted_window: Duration::minutes(2),
            fallback_match_window: Duration::seconds(30),
            amount_tolerance: 0.01,
            min_plausible_amount: 10.0,
            max_plausible_amount: 1_000_000.0,
        }
    }
}

/// Raw TOML shape for [`EngineConfig`] overrides.
///
/// Every field is optional; missing fields keep their defaults.
#[derive(Debug, Deserialize)]
struct RawConfig {
    cache_window_minutes: Option<i64>,
    persisted_window_seconds: Option<i64>,
    fallback_match_window_seconds: Option<i64>,
    amount_tolerance: Option<f64>,
    min_plausible_amount: Option<f64>,
    max_plausible_amount: Option<f64>,
}

impl EngineConfig {
    /// Parse a TOML override on top of the defaults.
    ///
    /// ```toml
    /// cache_window_minutes = 30
    /// persisted_window_seconds = 120
    /// fallback_match_window_seconds = 30
    /// min_plausible_amount = 10.0
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(minutes) = raw.cache_window_minutes {
            config.cache_window = Duration::minutes(minutes);
        }
        if let Some(seconds) = raw.persisted_window_seconds {
            config.persisted_window = Duration::seconds(seconds);
        }
        if let Some(seconds) = raw.fallback_match_window_seconds {
            config.fallback_match_window = Duration::seconds(seconds);
        }
        if let Some(tolerance) = raw.amount_tolerance {
            config.amount_tolerance = tolerance;
        }
        if let Some(min) = raw.min_plausible_amount {
            config.min_plausible_amount = min;
        }
        if let Some(max) = raw.max_plausible_amount {
            config.max_plausible_amount = max;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_windows() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_window, Duration::minutes(30));
        assert_eq!(config.persisted_window, Duration::minutes(2));
        assert_eq!(config.fallback_match_window, Duration::seconds(30));
    }

    #[test]
    fn test_partial_toml_override() {
        let config = EngineConfig::from_toml_str("cache_window_minutes = 10").unwrap();
        assert_eq!(config.cache_window, Duration::minutes(10));
        // Untouched fields keep their defaults
        assert_eq!(config.persisted_window, Duration::minutes(2));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(EngineConfig::from_toml_str("cache_window_minutes = [").is_err());
    }
}
