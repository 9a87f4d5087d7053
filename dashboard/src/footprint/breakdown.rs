//! Breakdown aggregation: folds backend category records into the subject
//! type's canonical template, fixes one authoritative total and derives every
//! slice percentage from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::category::{
    normalize_category_name, CanonicalCategory, SliceOrigin, SubjectType, EXTRA_PALETTE,
};
use super::snapshot::null_as_default;
use crate::core::numeric::{kg_or_zero, round1};

/// One category entry as the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategoryRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub value_kg_co2e: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl RawCategoryRecord {
    pub fn new(name: impl Into<String>, value_kg_co2e: f64) -> Self {
        Self {
            name: name.into(),
            value_kg_co2e: Some(value_kg_co2e),
            percentage: None,
        }
    }
}

/// Where the total used for percentages came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalSource {
    Backend,
    Summed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    /// Template slots in template order, then extras in input order.
    pub slices: Vec<CanonicalCategory>,
    /// Authoritative total, kg CO2e.
    pub total: f64,
    pub total_source: TotalSource,
}

impl Breakdown {
    pub fn slice(&self, id: &str) -> Option<&CanonicalCategory> {
        self.slices.iter().find(|slice| slice.id == id)
    }

    pub fn extras(&self) -> impl Iterator<Item = &CanonicalCategory> {
        self.slices.iter().filter(|slice| slice.is_extra())
    }
}

/// Merge `raw` into the canonical template for `subject`.
///
/// Matched records overwrite their slot (last one wins). Unmatched records are
/// appended as extra slices and never dropped. A finite, non-negative
/// `backend_total` is authoritative; otherwise the slice values are summed.
/// Percentages are always recomputed against that single total, replacing any
/// backend-supplied percentage.
pub fn aggregate_breakdown(
    raw: &[RawCategoryRecord],
    backend_total: Option<f64>,
    subject: SubjectType,
) -> Breakdown {
    let mut slices: Vec<CanonicalCategory> = subject
        .template()
        .iter()
        .map(CanonicalCategory::from_def)
        .collect();
    let template_len = slices.len();

    for record in raw {
        let value = round1(kg_or_zero(record.value_kg_co2e));
        let percentage = record.percentage.filter(|p| p.is_finite()).map(round1);

        let slot = normalize_category_name(&record.name, subject).and_then(|id| {
            slices[..template_len]
                .iter()
                .position(|slice| slice.id == id.as_str())
        });

        match slot {
            Some(idx) => {
                slices[idx].value = value;
                slices[idx].percentage = percentage;
            }
            None => {
                let extra_count = slices.len() - template_len;
                let id = extra_id(&record.name, &slices);
                debug!(name = %record.name, %id, value, "appending unmatched category as extra slice");
                slices.push(CanonicalCategory {
                    display_key: display_name(&record.name, &id),
                    id,
                    color: EXTRA_PALETTE[extra_count % EXTRA_PALETTE.len()].to_string(),
                    value,
                    percentage,
                    origin: SliceOrigin::Extra,
                });
            }
        }
    }

    let (total, total_source) = match backend_total {
        Some(total) if total.is_finite() && total >= 0.0 => (round1(total), TotalSource::Backend),
        other => {
            if let Some(rejected) = other {
                debug!(total = rejected, "ignoring malformed backend total");
            }
            let summed: f64 = slices.iter().map(|slice| slice.value).sum();
            (round1(summed), TotalSource::Summed)
        }
    };

    for slice in &mut slices {
        slice.percentage = Some(percentage_of(slice.value, total));
    }

    Breakdown {
        slices,
        total,
        total_source,
    }
}

/// One-decimal share of `total`; zero when the total is zero.
pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        round1(value / total * 100.0)
    } else {
        0.0
    }
}

fn extra_id(name: &str, existing: &[CanonicalCategory]) -> String {
    let mut slug = String::new();
    for ch in name.trim().to_lowercase().chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    let base = if slug.is_empty() {
        "extra".to_string()
    } else {
        format!("extra-{slug}")
    };

    let mut id = base.clone();
    let mut suffix = 2;
    while existing.iter().any(|slice| slice.id == id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    id
}

fn display_name(raw: &str, id: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        id.to_string()
    } else {
        trimmed.to_string()
    }
}
