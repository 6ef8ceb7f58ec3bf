// Tukey-fence outlier classification
//
// Benchmark latencies routinely carry a few runs hit by GC pauses or
// scheduler jitter. They are reported for display only: the shift estimator
// is rank-based and does not need them removed.

use crate::compare::quantile::QuantileSummary;

/// Multiplier applied to the IQR to place the fences
pub const TUKEY_FENCE_FACTOR: f64 = 1.5;

/// Lower and upper Tukey fences (`q1 - 1.5·IQR`, `q3 + 1.5·IQR`)
pub fn tukey_fences(summary: &QuantileSummary) -> (f64, f64) {
    let iqr = summary.iqr();
    (
        summary.q1 - TUKEY_FENCE_FACTOR * iqr,
        summary.q3 + TUKEY_FENCE_FACTOR * iqr,
    )
}

/// Values strictly outside the fences, in original order
///
/// Returns an empty list for an empty summary.
pub fn detect_outliers(values: &[f64], summary: &QuantileSummary) -> Vec<f64> {
    if summary.is_empty() {
        return Vec::new();
    }
    let (low, high) = tukey_fences(summary);
    values
        .iter()
        .copied()
        .filter(|&v| v < low || v > high)
        .collect()
}
