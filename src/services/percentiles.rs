use serde::Serialize;

/// Spread of a per-iteration figure across a run.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OutputPercentiles {
    pub p0: f64,
    pub p50: f64,
    pub p85: f64,
    pub p100: f64,
}

impl OutputPercentiles {
    /// Sorts `values` and reads off P0/P50/P85/P100. Empty input gives zeros.
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self {
            p0: value_sorted(&sorted, 0.0).unwrap_or(0.0),
            p50: value_sorted(&sorted, 50.0).unwrap_or(0.0),
            p85: value_sorted(&sorted, 85.0).unwrap_or(0.0),
            p100: value_sorted(&sorted, 100.0).unwrap_or(0.0),
        }
    }
}

/// Returns the percentile value from a slice sorted in ascending order.
///
/// `percentile <= 0` gives the first element and `percentile >= 100` the
/// last; anything between rounds to the nearest index in `[0, len-1]`.
pub fn value_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        last
    } else {
        ((percentile / 100.0) * last as f64).round() as usize
    };
    sorted_values.get(index).copied()
}
