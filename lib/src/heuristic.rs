//! Deterministic linear fallback used while no trained model is loaded.
//!
//! ```text
//! queue = 15 + 0.5·time_of_day + 2·day_of_week + 0.3·store_traffic
//!            + 10·peak_hours + 3·avg_service_time − 5·checkout_counters
//! ```
//!
//! Works on raw, unnormalized values. The result is not clamped here and
//! may be infinite for extreme inputs, but is never NaN.

use crate::features::{FeatureVector, FEATURE_COUNT};

/// Queue length with every feature at zero.
pub const BASE_QUEUE: f64 = 15.0;

/// Per-feature coefficients in column order.
pub const WEIGHTS: [f64; FEATURE_COUNT] = [0.5, 2.0, 0.3, 10.0, 3.0, -5.0];

/// Values used for absent keys when the validation policy allows it.
pub const DEFAULTS: FeatureVector = FeatureVector {
    time_of_day: 12.0,
    day_of_week: 3.0,
    store_traffic: 50.0,
    peak_hours: 0.0,
    avg_service_time: 2.0,
    checkout_counters: 3.0,
};

/// Unclamped heuristic estimate. Never NaN for finite features: if the
/// weighted terms overflow, the sum is re-evaluated on values scaled down by
/// the largest magnitude, so the result saturates to the correct infinity.
pub fn estimate(features: &FeatureVector) -> f64 {
    let values = features.to_array();
    let direct = weighted_sum(&values, 1.0);
    if direct.is_finite() {
        return direct;
    }

    let scale = values.iter().fold(1.0_f64, |max, v| max.max(v.abs()));
    weighted_sum(&values, scale) * scale
}

/// `BASE_QUEUE / scale + Σ wᵢ·(xᵢ / scale)`
fn weighted_sum(values: &[f64; FEATURE_COUNT], scale: f64) -> f64 {
    values
        .iter()
        .zip(WEIGHTS.iter())
        .fold(BASE_QUEUE / scale, |acc, (value, weight)| {
            acc + value / scale * weight
        })
}
