//! Share and export renderings of a presentation model: a localized text
//! summary, a breakdown CSV and the full model as JSON.

use i18n_embed::fluent::FluentLanguageLoader;

use super::PresentationModel;
use crate::core::format::{format_decimal, format_percent, scale_for_display};
use crate::error::Error;
use crate::footprint::ComparisonStatus;
use crate::i18n::{category_label, fl};

/// Plain-text summary for sharing, one statement per line.
pub fn share_summary(model: &PresentationModel, loader: &FluentLanguageLoader) -> String {
    let mut lines = vec![
        fl!(loader, "share-title"),
        fl!(
            loader,
            "share-total",
            value = model.display.total.value.clone(),
            unit = model.display.total.unit.as_str()
        ),
    ];

    let comparison = &model.comparison;
    let magnitude = scale_for_display(comparison.absolute_delta.abs());
    let percent = format_percent(comparison.percent_delta.abs());
    lines.push(match comparison.status {
        ComparisonStatus::Increase => fl!(
            loader,
            "share-change-increase",
            value = magnitude.value.clone(),
            unit = magnitude.unit.as_str(),
            percent = percent
        ),
        ComparisonStatus::Decrease => fl!(
            loader,
            "share-change-decrease",
            value = magnitude.value.clone(),
            unit = magnitude.unit.as_str(),
            percent = percent
        ),
        ComparisonStatus::Same => fl!(loader, "share-change-same"),
    });

    for slice in model.visible_slices() {
        let scaled = scale_for_display(slice.value);
        lines.push(fl!(
            loader,
            "share-slice",
            label = category_label(loader, slice),
            value = scaled.value,
            unit = scaled.unit.as_str(),
            percent = format_percent(slice.percentage.unwrap_or(0.0))
        ));
    }

    if model.trend.synthetic {
        lines.push(fl!(loader, "share-trend-synthetic"));
    }

    lines.join("\n")
}

/// Breakdown slices as CSV, template slots first, in model order.
pub fn breakdown_csv(model: &PresentationModel) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(model.breakdown.len() + 1);
    rows.push(
        ["id", "label", "origin", "color", "value_kg_co2e", "percentage"]
            .into_iter()
            .map(String::from)
            .collect(),
    );

    for slice in &model.breakdown {
        rows.push(vec![
            slice.id.clone(),
            slice.display_key.clone(),
            if slice.is_extra() { "extra" } else { "canonical" }.to_string(),
            slice.color.clone(),
            format_decimal(slice.value, 1),
            slice
                .percentage
                .map(|p| format_decimal(p, 1))
                .unwrap_or_default(),
        ]);
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

/// The whole model as pretty-printed JSON.
pub fn model_json(model: &PresentationModel) -> Result<String, Error> {
    serde_json::to_string_pretty(model).map_err(Error::Encode)
}

/// File name for an export, e.g. `jejak-karbon-20261017_093000.csv`.
pub fn export_filename(extension: &str) -> String {
    format!("jejak-karbon-{}.{extension}", timestamp_slug())
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}
