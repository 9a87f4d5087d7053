//! Formatting helpers for presenting emission figures.
//!
//! Everything here is display-only. Aggregation and comparison math works on
//! the raw `f64` figures and never reads these strings back.

use std::fmt;

use serde::Serialize;

use super::numeric::{round1, round2};

/// Quantities at or above this many kilograms are shown in tons.
pub const TON_THRESHOLD_KG: f64 = 1000.0;

/// Appended when integer digits had to be dropped to fit the layout.
pub const TRUNCATION_MARKER: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Kg,
    Ton,
}

impl DisplayUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Ton => "ton",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity ready for display: the formatted number and its unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaledValue {
    pub value: String,
    pub unit: DisplayUnit,
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Pick kg or tons for a kg CO2e quantity.
///
/// Below [`TON_THRESHOLD_KG`] the value stays in kilograms with at most one
/// decimal (`12`, `12.5`). At or above it the value is divided by 1000 and
/// shown with exactly two decimals (`1.25`). The threshold applies to the
/// magnitude after rounding to the kilogram precision, so `999.96` reads
/// `1.00 ton` rather than `1000 kg`. Negative deltas scale the same way.
pub fn scale_for_display(value_kg_co2e: f64) -> ScaledValue {
    let value = if value_kg_co2e.is_finite() {
        value_kg_co2e
    } else {
        0.0
    };

    if round1(value).abs() >= TON_THRESHOLD_KG {
        ScaledValue {
            value: format!("{:.2}", round2(value / 1000.0)),
            unit: DisplayUnit::Ton,
        }
    } else {
        ScaledValue {
            value: format_decimal(value, 1),
            unit: DisplayUnit::Kg,
        }
    }
}

/// Format with at most `max_decimals` places, trimming trailing zeros.
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    let rounded = super::numeric::round_to(value, max_decimals as u32);
    let text = format!("{rounded:.max_decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// One-decimal percentage without the sign, e.g. `40` or `12.5`.
pub fn format_percent(value: f64) -> String {
    format_decimal(round1(value), 1)
}

/// Cap the number of digits shown for a (possibly huge) figure.
///
/// Digits are kept left to right until `max_digits` have been emitted.
/// Dropping fractional digits only shortens the precision; dropping integer
/// digits would misstate the magnitude, so the kept prefix is then followed by
/// [`TRUNCATION_MARKER`]. Signs, separators and suffixes before the cut are
/// preserved. `max_digits` below one is treated as one.
///
/// Every digit counts, leading zeros included: `("0.000123", 2)` gives `0.0`.
/// Only meant for display strings of already-scaled figures.
pub fn cap_leading_digits(value: impl fmt::Display, max_digits: usize) -> String {
    let text = value.to_string();
    let max_digits = max_digits.max(1);

    let mut kept = String::with_capacity(text.len());
    let mut digits = 0usize;
    let mut in_fraction = false;

    for (idx, ch) in text.char_indices() {
        if ch == '.' {
            in_fraction = true;
        }
        if ch.is_ascii_digit() {
            if digits == max_digits {
                if in_fraction {
                    let trimmed = kept.trim_end_matches('.');
                    let rest = text[idx..].trim_start_matches(|c: char| c.is_ascii_digit());
                    return format!("{trimmed}{rest}");
                }
                kept.push(TRUNCATION_MARKER);
                return kept;
            }
            digits += 1;
        }
        kept.push(ch);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_kilograms_below_threshold() {
        let scaled = scale_for_display(999.94);
        assert_eq!(scaled.value, "999.9");
        assert_eq!(scaled.unit, DisplayUnit::Kg);

        assert_eq!(scale_for_display(12.0).value, "12");
        assert_eq!(scale_for_display(0.0).to_string(), "0 kg");
    }

    #[test]
    fn switches_to_tons_at_threshold() {
        let scaled = scale_for_display(1000.0);
        assert_eq!(scaled.value, "1.00");
        assert_eq!(scaled.unit, DisplayUnit::Ton);

        assert_eq!(scale_for_display(12_345.0).to_string(), "12.35 ton");
    }

    #[test]
    fn unit_follows_rounded_value() {
        assert_eq!(scale_for_display(999.96).to_string(), "1.00 ton");
        assert_eq!(scale_for_display(-999.96).to_string(), "-1.00 ton");
        assert_eq!(scale_for_display(999.94).to_string(), "999.9 kg");
    }

    #[test]
    fn negative_deltas_scale_by_magnitude() {
        assert_eq!(scale_for_display(-2500.0).to_string(), "-2.50 ton");
        assert_eq!(scale_for_display(-12.25).to_string(), "-12.2 kg");
    }

    #[test]
    fn non_finite_displays_as_zero() {
        assert_eq!(scale_for_display(f64::NAN).to_string(), "0 kg");
    }

    #[test]
    fn short_figures_are_untouched() {
        assert_eq!(cap_leading_digits("123.4", 6), "123.4");
        assert_eq!(cap_leading_digits(42, 2), "42");
    }

    #[test]
    fn fraction_is_dropped_before_integer_digits() {
        assert_eq!(cap_leading_digits("1234.56", 5), "1234.5");
        assert_eq!(cap_leading_digits("1234.56", 4), "1234");
        assert_eq!(cap_leading_digits("1234.56 ton", 4), "1234 ton");
    }

    #[test]
    fn integer_overflow_gets_marker() {
        assert_eq!(cap_leading_digits("123456789", 6), "123456…");
        assert_eq!(cap_leading_digits("-98765.4", 3), "-987…");
        assert_eq!(cap_leading_digits("5", 0), "5");
    }

    #[test]
    fn leading_zeros_count_as_digits() {
        assert_eq!(cap_leading_digits("0.000123", 2), "0.0");
        assert_eq!(cap_leading_digits("0.5 kg", 1), "0 kg");
    }

    #[test]
    fn percent_trims_trailing_zero() {
        assert_eq!(format_percent(40.0), "40");
        assert_eq!(format_percent(12.5), "12.5");
    }
}
