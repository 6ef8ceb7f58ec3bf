// Order statistics for one group of one phase
//
// Percentiles use linear interpolation between closest ranks
// (index = p/100 * (n-1)), the same rule spreadsheet PERCENTILE.INC and
// numpy's default use. Sorting is always numeric (`f64::total_cmp`).

use crate::compare::outlier::detect_outliers;
use serde::{Deserialize, Serialize};

/// Seven-figure summary plus outliers and the raw values
///
/// For an empty group every statistic is NaN and `count` is 0; callers must
/// check `count` (or `is_empty`) before trusting the numbers. NaN statistics
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileSummary {
    pub count: usize,
    #[serde(with = "crate::compare::undefined")]
    pub min: f64,
    #[serde(with = "crate::compare::undefined")]
    pub p10: f64,
    #[serde(with = "crate::compare::undefined")]
    pub q1: f64,
    #[serde(with = "crate::compare::undefined")]
    pub median: f64,
    #[serde(with = "crate::compare::undefined")]
    pub q3: f64,
    #[serde(with = "crate::compare::undefined")]
    pub p90: f64,
    #[serde(with = "crate::compare::undefined")]
    pub max: f64,
    /// Values outside the Tukey fences, in original order
    pub outliers: Vec<f64>,
    /// Original values, in sample order
    pub values: Vec<f64>,
}

impl QuantileSummary {
    /// Summarize a group of values
    ///
    /// # Example
    /// ```
    /// use veredicto::compare::QuantileSummary;
    ///
    /// let summary = QuantileSummary::compute(&[5.0, 1.0, 4.0, 2.0, 3.0]);
    /// assert_eq!((summary.min, summary.q1, summary.median), (1.0, 2.0, 3.0));
    /// assert_eq!((summary.q3, summary.max), (4.0, 5.0));
    /// ```
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }

        let sorted = sorted_copy(values);
        let mut summary = Self {
            count: values.len(),
            min: sorted[0],
            p10: percentile(&sorted, 10.0),
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
            p90: percentile(&sorted, 90.0),
            max: sorted[sorted.len() - 1],
            outliers: Vec::new(),
            values: values.to_vec(),
        };
        summary.outliers = detect_outliers(values, &summary);
        summary
    }

    /// Summary of an empty group
    pub fn empty() -> Self {
        Self {
            count: 0,
            min: f64::NAN,
            p10: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            p90: f64::NAN,
            max: f64::NAN,
            outliers: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Interquartile range (`q3 - q1`)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Ascending numeric copy of `values`
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile (0-100) of an ascending slice by linear interpolation
///
/// Returns NaN for an empty slice.
pub fn percentile(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = (percentile / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        // Rounding in the lerp must not overshoot the upper neighbour
        let interpolated = sorted[lower] + (index - lower as f64) * (sorted[upper] - sorted[lower]);
        interpolated.min(sorted[upper])
    }
}

/// Median of an ascending slice
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_rank_quartiles() {
        let summary = QuantileSummary::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 5.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_interpolated_quartiles() {
        // idx(25) = 0.75, idx(50) = 1.5, idx(75) = 2.25
        let summary = QuantileSummary::compute(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(summary.q1, 17.5);
        assert_eq!(summary.median, 25.0);
        assert_eq!(summary.q3, 32.5);
        assert!((summary.p10 - 13.0).abs() < 1e-9);
        assert!((summary.p90 - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_value() {
        let summary = QuantileSummary::compute(&[7.5]);
        for stat in [
            summary.min,
            summary.p10,
            summary.q1,
            summary.median,
            summary.q3,
            summary.p90,
            summary.max,
        ] {
            assert_eq!(stat, 7.5);
        }
    }

    #[test]
    fn test_empty_summary_is_nan() {
        let summary = QuantileSummary::compute(&[]);
        assert!(summary.is_empty());
        assert!(summary.min.is_nan());
        assert!(summary.median.is_nan());
        assert!(summary.max.is_nan());
        assert!(summary.values.is_empty());
    }

    #[test]
    fn test_values_keep_original_order() {
        let summary = QuantileSummary::compute(&[3.0, 1.0, 2.0]);
        assert_eq!(summary.values, vec![3.0, 1.0, 2.0]);
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        // Lexicographic ordering would put "100" before "9"
        let summary = QuantileSummary::compute(&[100.0, 9.0, 20.0]);
        assert_eq!(summary.min, 9.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.max, 100.0);
    }

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(percentile(&[], 50.0).is_nan());
    }
}
