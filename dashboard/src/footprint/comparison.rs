//! Current-vs-previous period comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::snapshot::FootprintSnapshot;
use crate::core::numeric::{finite, kg_or_zero, round1};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Increase,
    Decrease,
    Same,
}

impl ComparisonStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            "same" => Some(Self::Same),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Same => "same",
        }
    }

    fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Increase
        } else if delta < 0.0 {
            Self::Decrease
        } else {
            Self::Same
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FootprintComparison {
    /// kg CO2e, one decimal.
    pub absolute_delta: f64,
    /// Percent, one decimal.
    pub percent_delta: f64,
    pub status: ComparisonStatus,
}

impl FootprintComparison {
    pub fn from_snapshot(snapshot: &FootprintSnapshot) -> Self {
        compare(
            snapshot.current_total,
            snapshot.previous_total,
            snapshot.comparison_abs,
            snapshot.comparison_pct,
            snapshot.comparison_status,
        )
    }
}

/// Compare two period totals, preferring backend-supplied figures when present.
///
/// A zero previous total gives a percent delta of zero unless the backend
/// supplied one. The status follows the sign of the rounded absolute delta.
pub fn compare(
    current: f64,
    previous: f64,
    backend_abs: Option<f64>,
    backend_pct: Option<f64>,
    backend_status: Option<ComparisonStatus>,
) -> FootprintComparison {
    let current = kg_or_zero(Some(current));
    let previous = kg_or_zero(Some(previous));

    let absolute_delta = round1(finite(backend_abs).unwrap_or(current - previous));
    let percent_delta = round1(finite(backend_pct).unwrap_or_else(|| {
        if previous != 0.0 {
            (current - previous) / previous * 100.0
        } else {
            0.0
        }
    }));
    let status = backend_status.unwrap_or_else(|| ComparisonStatus::from_delta(absolute_delta));

    FootprintComparison {
        absolute_delta,
        percent_delta,
        status,
    }
}
