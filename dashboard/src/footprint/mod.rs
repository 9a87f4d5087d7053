//! The carbon footprint pipeline: category normalisation, trend series,
//! breakdown aggregation and period comparison.

pub mod breakdown;
pub mod category;
pub mod comparison;
pub mod snapshot;
pub mod trend;

pub use breakdown::{aggregate_breakdown, Breakdown, RawCategoryRecord, TotalSource};
pub use category::{
    normalize_category_name, CanonicalCategory, CanonicalId, SliceOrigin, SubjectType,
};
pub use comparison::{compare, ComparisonStatus, FootprintComparison};
pub use snapshot::{
    DashboardResponse, DashboardSnapshot, FootprintResponse, FootprintSnapshot, TrendChart,
};
pub use trend::{build_trend, build_trend_with, Timeframe, TrendPoint, TrendSeries};
