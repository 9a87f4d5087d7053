//! Assembles the presentation model consumed by the dashboard view and the
//! share feature.

pub mod share;

use serde::Serialize;

use crate::core::format::{cap_leading_digits, scale_for_display, ScaledValue};
use crate::core::PresentationConfig;
use crate::footprint::{
    aggregate_breakdown, build_trend_with, CanonicalCategory, DashboardSnapshot,
    FootprintComparison, FootprintSnapshot, SubjectType, Timeframe, TotalSource, TrendSeries,
};

/// Display strings derived from the model's figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFigures {
    pub total: ScaledValue,
    /// `total.value` capped to the configured digit budget.
    pub total_capped: String,
    pub delta: ScaledValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationModel {
    pub subject: SubjectType,
    pub timeframe: Timeframe,
    pub trend: TrendSeries,
    pub breakdown: Vec<CanonicalCategory>,
    /// Authoritative breakdown total, kg CO2e.
    pub total: f64,
    pub total_source: TotalSource,
    pub comparison: FootprintComparison,
    pub display: DisplayFigures,
}

impl PresentationModel {
    /// Slices worth listing in a summary: every slice with a non-zero value.
    pub fn visible_slices(&self) -> impl Iterator<Item = &CanonicalCategory> {
        self.breakdown.iter().filter(|slice| slice.value > 0.0)
    }
}

/// Derive the presentation model from one dashboard and one footprint snapshot.
pub fn present(
    dashboard: &DashboardSnapshot,
    footprint: &FootprintSnapshot,
    subject: SubjectType,
    config: &PresentationConfig,
) -> PresentationModel {
    let trend = build_trend_with(dashboard.timeframe, dashboard.trend.as_ref(), subject, config);
    let breakdown = aggregate_breakdown(&dashboard.breakdown, dashboard.breakdown_total, subject);
    let comparison = FootprintComparison::from_snapshot(footprint);

    let total = scale_for_display(breakdown.total);
    let display = DisplayFigures {
        total_capped: cap_leading_digits(&total.value, config.total_max_digits),
        total,
        delta: scale_for_display(comparison.absolute_delta),
    };

    PresentationModel {
        subject,
        timeframe: dashboard.timeframe,
        trend,
        breakdown: breakdown.slices,
        total: breakdown.total,
        total_source: breakdown.total_source,
        comparison,
        display,
    }
}
