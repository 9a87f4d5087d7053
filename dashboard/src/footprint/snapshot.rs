//! Wire contracts returned by the reporting backend and the snapshots the
//! pipeline works on.
//!
//! Decoding is deliberately forgiving: every field may be missing or `null`,
//! and unknown `timeframe` / `status` strings decode as absent. Only JSON that
//! is not a document of the right shape at all is rejected.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::breakdown::RawCategoryRecord;
use super::comparison::ComparisonStatus;
use super::trend::Timeframe;
use crate::core::numeric::{finite, kg_or_zero};
use crate::error::Error;

/// `null` and missing both mean "use the default".
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownChart {
    #[serde(default)]
    pub total_kg_co2e: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<RawCategoryRecord>,
}

/// Body of the dashboard endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub trend_chart: Option<TrendChart>,
    #[serde(default)]
    pub breakdown_chart: Option<BreakdownChart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    #[serde(default)]
    pub difference_kgco2e: Option<f64>,
    #[serde(default)]
    pub difference_percent: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of the footprint endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintResponse {
    #[serde(default)]
    pub current_month_total_kgco2e: Option<f64>,
    #[serde(default)]
    pub previous_month_total_kgco2e: Option<f64>,
    #[serde(default)]
    pub comparison: Option<ComparisonPayload>,
}

/// Dashboard data after defaults are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub timeframe: Timeframe,
    /// `None` when the backend sent no trend or no labels.
    pub trend: Option<TrendChart>,
    pub breakdown_total: Option<f64>,
    pub breakdown: Vec<RawCategoryRecord>,
}

impl DashboardSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let response: DashboardResponse =
            serde_json::from_str(raw).map_err(|source| Error::Decode {
                context: "dashboard response",
                source,
            })?;
        Ok(response.into())
    }
}

impl From<DashboardResponse> for DashboardSnapshot {
    fn from(response: DashboardResponse) -> Self {
        let timeframe = match response.timeframe.as_deref() {
            Some(raw) => Timeframe::parse(raw).unwrap_or_else(|| {
                debug!(timeframe = raw, "unknown timeframe, using month");
                Timeframe::default()
            }),
            None => Timeframe::default(),
        };

        let trend = response
            .trend_chart
            .filter(|chart| !chart.labels.is_empty());
        let breakdown = response.breakdown_chart.unwrap_or_default();

        Self {
            timeframe,
            trend,
            breakdown_total: breakdown.total_kg_co2e,
            breakdown: breakdown.categories,
        }
    }
}

/// Current and previous period totals with any backend-computed comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootprintSnapshot {
    pub current_total: f64,
    pub previous_total: f64,
    pub comparison_abs: Option<f64>,
    pub comparison_pct: Option<f64>,
    pub comparison_status: Option<ComparisonStatus>,
}

impl FootprintSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let response: FootprintResponse =
            serde_json::from_str(raw).map_err(|source| Error::Decode {
                context: "footprint response",
                source,
            })?;
        Ok(response.into())
    }
}

impl From<FootprintResponse> for FootprintSnapshot {
    fn from(response: FootprintResponse) -> Self {
        let comparison = response.comparison.unwrap_or_default();
        let comparison_status = comparison.status.as_deref().and_then(|raw| {
            let status = ComparisonStatus::parse(raw);
            if status.is_none() {
                debug!(status = raw, "ignoring unknown comparison status");
            }
            status
        });

        Self {
            current_total: kg_or_zero(response.current_month_total_kgco2e),
            previous_total: kg_or_zero(response.previous_month_total_kgco2e),
            comparison_abs: finite(comparison.difference_kgco2e),
            comparison_pct: finite(comparison.difference_percent),
            comparison_status,
        }
    }
}
