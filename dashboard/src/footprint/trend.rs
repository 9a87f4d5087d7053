//! Trend series for the dashboard chart: relabels backend codes and
//! synthesises a placeholder series when the backend has none.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Month;
use tracing::debug;

use super::category::SubjectType;
use super::snapshot::TrendChart;
use crate::core::numeric::{kg_or_zero, round1, round2};
use crate::core::PresentationConfig;

/// Indonesian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub const WEEK_LABEL_PREFIX: &str = "Minggu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Year,
}

impl Timeframe {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    /// kg CO2e.
    pub value: f64,
}

/// Chronologically ordered chart points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub timeframe: Timeframe,
    pub points: Vec<TrendPoint>,
    /// `true` when the points are a client-side placeholder, not backend data.
    pub synthetic: bool,
}

impl TrendSeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

pub fn month_label(month: Month) -> &'static str {
    MONTH_NAMES[month as usize - 1]
}

pub fn week_label(week: impl fmt::Display) -> String {
    format!("{WEEK_LABEL_PREFIX} {week}")
}

/// Build the series with the default placeholder configuration.
pub fn build_trend(
    timeframe: Timeframe,
    backend: Option<&TrendChart>,
    subject: SubjectType,
) -> TrendSeries {
    build_trend_with(timeframe, backend, subject, &PresentationConfig::default())
}

/// Build the series for `timeframe`.
///
/// Backend points keep their order; values are rounded to one decimal and
/// labels go through [`relabel`]. Without backend points, a year yields twelve
/// zero-valued months and a week or month yields one point per configured
/// week weight, spreading the baseline across them.
pub fn build_trend_with(
    timeframe: Timeframe,
    backend: Option<&TrendChart>,
    subject: SubjectType,
    config: &PresentationConfig,
) -> TrendSeries {
    if let Some(chart) = backend.filter(|chart| !chart.labels.is_empty()) {
        let points = chart
            .labels
            .iter()
            .enumerate()
            .map(|(idx, label)| TrendPoint {
                label: relabel(label),
                value: round1(kg_or_zero(chart.data.get(idx).copied().flatten())),
            })
            .collect();
        return TrendSeries {
            timeframe,
            points,
            synthetic: false,
        };
    }

    debug!(%timeframe, %subject, "no backend trend, synthesising placeholder series");

    let points = match timeframe {
        Timeframe::Year => {
            let mut month = Month::January;
            let mut points = Vec::with_capacity(12);
            for _ in 0..12 {
                points.push(TrendPoint {
                    label: month_label(month).to_string(),
                    value: 0.0,
                });
                month = month.next();
            }
            points
        }
        Timeframe::Week | Timeframe::Month => {
            let baseline = config.baseline_kg();
            config
                .normalized_week_weights()
                .into_iter()
                .enumerate()
                .map(|(idx, weight)| TrendPoint {
                    label: week_label(idx + 1),
                    value: round2(baseline * weight),
                })
                .collect()
        }
    };

    TrendSeries {
        timeframe,
        points,
        synthetic: true,
    }
}

/// Translate backend label codes for display.
///
/// `W<digits>` (any case) becomes `Minggu <digits>`; English month names and
/// three-letter abbreviations become Indonesian month names. Anything else is
/// returned unchanged.
pub fn relabel(raw: &str) -> String {
    let code = raw.trim();

    if let Some(digits) = code.strip_prefix(['W', 'w']) {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return week_label(digits);
        }
    }

    if let Some(month) = parse_english_month(code) {
        return month_label(month).to_string();
    }

    raw.to_string()
}

fn parse_english_month(code: &str) -> Option<Month> {
    if code.len() < 3 {
        return None;
    }
    let code = code.to_lowercase();
    let mut month = Month::January;
    for _ in 0..12 {
        let name = month.to_string().to_lowercase();
        if code == name || (code.len() == 3 && name.starts_with(&code)) {
            return Some(month);
        }
        month = month.next();
    }
    None
}
