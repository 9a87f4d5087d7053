use crate::core::format::{cap_leading_digits, scale_for_display};
use crate::core::PresentationConfig;
use crate::footprint::{
    aggregate_breakdown, build_trend, compare, normalize_category_name, ComparisonStatus,
    DashboardSnapshot, FootprintSnapshot, RawCategoryRecord, SubjectType, Timeframe, TrendChart,
};
use crate::results::present;
use proptest::prelude::*;

const NAMES: [&str; 8] = [
    "Transportasi",
    "Listrik PLN",
    "Limbah",
    "Sampah Dapur",
    "Food",
    "Daur Ulang",
    "Air Bersih",
    "",
];

fn arb_subject() -> impl Strategy<Value = SubjectType> {
    prop_oneof![Just(SubjectType::Individual), Just(SubjectType::Institution)]
}

fn arb_timeframe() -> impl Strategy<Value = Timeframe> {
    prop_oneof![
        Just(Timeframe::Week),
        Just(Timeframe::Month),
        Just(Timeframe::Year)
    ]
}

prop_compose! {
    fn arb_record()(
        name in prop::sample::select(NAMES.to_vec()),
        value in prop::option::of(-50.0f64..5_000.0),
        percentage in prop::option::of(0.0f64..100.0),
    ) -> RawCategoryRecord {
        RawCategoryRecord { name: name.to_string(), value_kg_co2e: value, percentage }
    }
}

prop_compose! {
    /// At most one unmatched record, so slices never exceed four and the
    /// per-slice rounding error stays within the closure tolerance.
    fn arb_closure_records()(
        transport in 0.0f64..5_000.0,
        listrik in 0.0f64..5_000.0,
        food in 0.0f64..5_000.0,
        extra in prop::option::of(0.1f64..5_000.0),
    ) -> Vec<RawCategoryRecord> {
        let mut records = vec![
            RawCategoryRecord::new("Transport", transport),
            RawCategoryRecord::new("Listrik", listrik),
            RawCategoryRecord::new("Food", food),
        ];
        if let Some(extra) = extra {
            records.push(RawCategoryRecord::new("Daur Ulang", extra));
        }
        records
    }
}

prop_compose! {
    fn arb_trend()(
        labels in prop::collection::vec("[Ww][0-9]{1,2}|[A-Za-z]{3,9}", 0..16),
        data in prop::collection::vec(prop::option::of(-10.0f64..10_000.0), 0..16),
    ) -> TrendChart {
        TrendChart { labels, data }
    }
}

proptest! {
    /// Property: identical snapshots produce identical models, down to the bytes.
    #[test]
    fn prop_present_is_deterministic(
        records in prop::collection::vec(arb_record(), 0..12),
        total in prop::option::of(-10.0f64..20_000.0),
        trend in prop::option::of(arb_trend()),
        timeframe in arb_timeframe(),
        subject in arb_subject(),
        current in -10.0f64..10_000.0,
        previous in -10.0f64..10_000.0,
    ) {
        let dashboard = DashboardSnapshot {
            timeframe,
            trend,
            breakdown_total: total,
            breakdown: records,
        };
        let footprint = FootprintSnapshot {
            current_total: current,
            previous_total: previous,
            ..FootprintSnapshot::default()
        };
        let config = PresentationConfig::default();

        let first = serde_json::to_string(&present(&dashboard, &footprint, subject, &config)).unwrap();
        let second = serde_json::to_string(&present(&dashboard, &footprint, subject, &config)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: locally summed breakdowns have percentages summing to 100 ± 0.2
    #[test]
    fn prop_percentages_close_to_hundred(
        records in arb_closure_records(),
        subject in arb_subject(),
    ) {
        let breakdown = aggregate_breakdown(&records, None, subject);
        prop_assume!(breakdown.total > 0.0);

        let sum: f64 = breakdown.slices.iter().filter_map(|s| s.percentage).sum();
        prop_assert!((sum - 100.0).abs() <= 0.2 + 1e-9, "percentages summed to {}", sum);
    }

    /// Property: with any number of slices the closure error is bounded by
    /// half a rounding step per slice
    #[test]
    fn prop_percentage_error_bounded_per_slice(
        values in prop::collection::vec(0.1f64..5_000.0, 1..24),
        subject in arb_subject(),
    ) {
        let records: Vec<RawCategoryRecord> = values
            .iter()
            .enumerate()
            .map(|(idx, value)| RawCategoryRecord::new(format!("Lain {idx}"), *value))
            .collect();
        let breakdown = aggregate_breakdown(&records, None, subject);
        prop_assume!(breakdown.total > 0.0);

        let sum: f64 = breakdown.slices.iter().filter_map(|s| s.percentage).sum();
        let bound = 0.05 * breakdown.slices.len() as f64 + 0.1;
        prop_assert!((sum - 100.0).abs() <= bound, "percentages summed to {}", sum);
    }

    /// Property: the template survives any input and nothing is dropped
    #[test]
    fn prop_template_and_records_preserved(
        records in prop::collection::vec(arb_record(), 0..12),
        subject in arb_subject(),
    ) {
        let breakdown = aggregate_breakdown(&records, None, subject);
        let template = subject.template();

        for (slice, def) in breakdown.slices.iter().zip(template) {
            prop_assert_eq!(slice.id.as_str(), def.id.as_str());
        }

        let unmatched = records
            .iter()
            .filter(|r| normalize_category_name(&r.name, subject).is_none())
            .count();
        prop_assert_eq!(breakdown.slices.len(), template.len() + unmatched);
        prop_assert!(breakdown.slices.iter().all(|s| s.value >= 0.0 && s.percentage.is_some()));
    }

    /// Property: the comparison never produces NaN and status agrees with the delta
    #[test]
    fn prop_compare_is_total(
        current in prop::num::f64::ANY,
        previous in prop::num::f64::ANY,
    ) {
        let cmp = compare(current, previous, None, None, None);
        prop_assert!(cmp.absolute_delta.is_finite());
        prop_assert!(cmp.percent_delta.is_finite());
        let expected = if cmp.absolute_delta > 0.0 {
            ComparisonStatus::Increase
        } else if cmp.absolute_delta < 0.0 {
            ComparisonStatus::Decrease
        } else {
            ComparisonStatus::Same
        };
        prop_assert_eq!(cmp.status, expected);
    }

    /// Property: backend trend points keep their count and order
    #[test]
    fn prop_backend_trend_keeps_shape(
        chart in arb_trend(),
        timeframe in arb_timeframe(),
    ) {
        prop_assume!(!chart.labels.is_empty());
        let series = build_trend(timeframe, Some(&chart), SubjectType::Individual);
        prop_assert!(!series.synthetic);
        prop_assert_eq!(series.points.len(), chart.labels.len());
        prop_assert!(series.points.iter().all(|p| p.value >= 0.0));
    }

    /// Property: normalisation does not depend on letter case
    #[test]
    fn prop_normalizer_ignores_case(
        name in "[A-Za-z ]{0,24}",
        subject in arb_subject(),
    ) {
        prop_assert_eq!(
            normalize_category_name(&name.to_uppercase(), subject),
            normalize_category_name(&name.to_lowercase(), subject)
        );
    }

    /// Property: capping bounds the digit count of the kept prefix
    #[test]
    fn prop_cap_bounds_digits(value in 0.0f64..1e12, max in 1usize..10) {
        let scaled = scale_for_display(value);
        let capped = cap_leading_digits(&scaled.value, max);
        let digits = capped.chars().filter(|c| c.is_ascii_digit()).count();
        prop_assert!(digits <= max);
    }
}
