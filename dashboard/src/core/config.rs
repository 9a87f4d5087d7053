//! Tunables for presentation. Every field has a default, so a host can ship
//! a partial JSON document (or none at all).

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Daily per-person emission assumed by the placeholder trend.
pub const FALLBACK_DAILY_KG: f64 = 200.0;
/// Days in the placeholder month.
pub const FALLBACK_DAYS: f64 = 30.0;
/// Relative weight of each week in the placeholder month.
pub const FALLBACK_WEEK_WEIGHTS: [f64; 4] = [0.9, 1.0, 1.05, 1.05];
/// Digits the headline total may occupy before it is capped.
pub const TOTAL_MAX_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Monthly total spread across the placeholder weeks.
    pub fallback_monthly_baseline_kg: f64,
    /// One weight per placeholder week; normalised before use.
    pub fallback_week_weights: Vec<f64>,
    pub total_max_digits: usize,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            fallback_monthly_baseline_kg: FALLBACK_DAILY_KG * FALLBACK_DAYS,
            fallback_week_weights: FALLBACK_WEEK_WEIGHTS.to_vec(),
            total_max_digits: TOTAL_MAX_DIGITS,
        }
    }
}

impl PresentationConfig {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|source| Error::Decode {
            context: "presentation config",
            source,
        })
    }

    /// Week weights summing to one. Falls back to the built-in weights when
    /// the configured ones are empty, non-finite, negative or sum to zero.
    pub fn normalized_week_weights(&self) -> Vec<f64> {
        let usable = !self.fallback_week_weights.is_empty()
            && self
                .fallback_week_weights
                .iter()
                .all(|w| w.is_finite() && *w >= 0.0);
        let weights: &[f64] = if usable {
            &self.fallback_week_weights
        } else {
            &FALLBACK_WEEK_WEIGHTS
        };

        let sum: f64 = weights.iter().sum();
        if sum > 0.0 {
            weights.iter().map(|w| w / sum).collect()
        } else {
            let sum: f64 = FALLBACK_WEEK_WEIGHTS.iter().sum();
            FALLBACK_WEEK_WEIGHTS.iter().map(|w| w / sum).collect()
        }
    }

    /// Baseline used by the placeholder trend; malformed values use the default.
    pub fn baseline_kg(&self) -> f64 {
        let baseline = self.fallback_monthly_baseline_kg;
        if baseline.is_finite() && baseline >= 0.0 {
            baseline
        } else {
            FALLBACK_DAILY_KG * FALLBACK_DAYS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let config = PresentationConfig::default();
        assert_eq!(config.baseline_kg(), 6000.0);
        assert_eq!(config.fallback_week_weights, vec![0.9, 1.0, 1.05, 1.05]);
        assert_eq!(config.total_max_digits, 7);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = PresentationConfig::from_json(r#"{ "total_max_digits": 4 }"#).unwrap();
        assert_eq!(config.total_max_digits, 4);
        assert_eq!(config.baseline_kg(), 6000.0);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PresentationConfig::from_json("{ nope").unwrap_err();
        assert!(err.to_string().contains("presentation config"));
    }

    #[test]
    fn unusable_weights_use_builtin_vector() {
        let config = PresentationConfig {
            fallback_week_weights: vec![0.0, 0.0],
            ..PresentationConfig::default()
        };
        assert_eq!(config.normalized_week_weights().len(), 4);

        let config = PresentationConfig {
            fallback_week_weights: vec![],
            ..PresentationConfig::default()
        };
        let weights = config.normalized_week_weights();
        assert_eq!(weights.len(), 4);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
