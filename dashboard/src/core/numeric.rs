//! Rounding and coercion rules shared by every stage of the pipeline.

use tracing::debug;

/// Round half up (towards positive infinity) to `decimals` places.
///
/// Non-finite input yields `0.0` and the result is never negative zero, so
/// repeated runs over the same snapshot serialise identically.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded / factor + 0.0
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Coerce an emission quantity: absent, NaN, infinite and negative values become `0.0`.
pub fn kg_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            debug!(value = v, "coercing malformed emission value to zero");
            0.0
        }
        None => 0.0,
    }
}

/// Keep a signed quantity only when it is finite.
pub fn finite(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() => Some(v),
        Some(v) => {
            debug!(value = v, "dropping non-finite backend figure");
            None
        }
        None => None,
    }
}
