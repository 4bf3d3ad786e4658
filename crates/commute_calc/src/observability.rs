//! Logging and counters shared by the engine's setters and `compute`.

use crate::CommuteError;

pub const COMPUTE_TOTAL: &str = "commute_calc_compute_total";
pub const REJECTED_SETTER_TOTAL: &str = "commute_calc_rejected_setter_total";

pub fn record_compute(distance_miles: f64, trip_count: f64) {
    tracing::trace!(distance_miles, trip_count, "computing results");
    metrics::counter!(COMPUTE_TOTAL).increment(1);
}

pub fn record_rejection(setter: &'static str, err: &CommuteError) {
    tracing::warn!(setter, error = %err, "rejected setter call");
    metrics::counter!(REJECTED_SETTER_TOTAL, "setter" => setter).increment(1);
}
