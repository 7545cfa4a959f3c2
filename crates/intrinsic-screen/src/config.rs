//! Screening configuration.

use std::fs;
use std::path::Path;

use chrono::Duration;
use intrinsic_traits::{IntrinsicError, Result};
use intrinsic_valuation::ValuationParams;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL_HOURS;
use crate::criteria::ScreeningCriteria;

/// Default number of tickers screened per run.
pub const DEFAULT_MAX_TICKERS: usize = 100;

/// Configuration of a screening run.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```json
/// { "max_tickers": 50, "criteria": { "max_price_to_earnings": 25.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Only the first `max_tickers` constituents are screened (default: 100)
    pub max_tickers: usize,

    /// Filter thresholds
    pub criteria: ScreeningCriteria,

    /// DCF rates and horizon (default: 10% growth, 8% discount, 5 years)
    #[serde(default = "screening_params")]
    pub params: ValuationParams,

    /// Age after which a cached record is refetched (default: 24)
    pub cache_ttl_hours: i64,
}

const fn screening_params() -> ValuationParams {
    ValuationParams::screening()
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            max_tickers: DEFAULT_MAX_TICKERS,
            criteria: ScreeningCriteria::default(),
            params: screening_params(),
            cache_ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

impl ScreenConfig {
    /// Read a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            IntrinsicError::InvalidData(format!("Invalid config {}: {e}", path.display()))
        })
    }

    /// Set the ticker cap.
    #[must_use]
    pub const fn with_max_tickers(mut self, max_tickers: usize) -> Self {
        self.max_tickers = max_tickers;
        self
    }

    /// Cache time-to-live as a duration.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::hours(self.cache_ttl_hours.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.max_tickers, 100);
        assert_eq!(config.params, ValuationParams::screening());
        assert_eq!(config.cache_ttl(), Duration::hours(24));
    }

    #[test]
    fn test_partial_json() {
        let config: ScreenConfig =
            serde_json::from_str(r#"{"max_tickers": 5, "criteria": {"min_quick_ratio": 0.8}}"#)
                .unwrap();
        assert_eq!(config.max_tickers, 5);
        assert_relative_eq!(config.criteria.min_quick_ratio, 0.8);
        assert_relative_eq!(config.criteria.max_debt_ratio, 1.0);
        assert_eq!(config.params, ValuationParams::screening());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.json");
        fs::write(&path, r#"{"cache_ttl_hours": 2}"#).unwrap();

        let config = ScreenConfig::from_json_file(&path).unwrap();
        assert_eq!(config.cache_ttl(), Duration::hours(2));
        assert_eq!(config.with_max_tickers(3).max_tickers, 3);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            ScreenConfig::from_json_file(&path),
            Err(IntrinsicError::InvalidData(_))
        ));
    }
}
