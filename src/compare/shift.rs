// Location-shift estimation between control and experiment
//
// Benchmark timings are skewed, heavy-tailed and small-sample, so nothing
// here assumes normality of the data:
//
// - Point estimate: Hodges-Lehmann, the median of all n·m pairwise
//   differences (experiment - control).
// - Interval: order statistics of the same difference multiset, with ranks
//   taken from the normal approximation to the Mann-Whitney U distribution.
// - p-value: continuity-corrected normal approximation of U.
//
// Only the *ranks* use the normal approximation; the interval bounds are
// actual observed differences.

use crate::compare::quantile::median;
use serde::{Deserialize, Serialize};
use statrs::function::erf::{erf_inv, erfc};
use std::f64::consts::SQRT_2;

/// Shift of the experiment relative to control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftEstimate {
    /// Hodges-Lehmann estimate of `experiment - control`
    #[serde(with = "crate::compare::undefined")]
    pub point_estimate: f64,
    /// Lower bound of the confidence interval
    #[serde(with = "crate::compare::undefined")]
    pub ci_low: f64,
    /// Upper bound of the confidence interval
    #[serde(with = "crate::compare::undefined")]
    pub ci_high: f64,
    /// Confidence level the interval was built for
    pub confidence_level: f64,
    /// Two-sided p-value of the Mann-Whitney test
    #[serde(with = "crate::compare::undefined")]
    pub p_value: f64,
    /// Mann-Whitney U: pairs with `e > c`, ties counted as 0.5
    #[serde(with = "crate::compare::undefined")]
    pub u_statistic: f64,
    /// Continuity-corrected z-score of U
    #[serde(with = "crate::compare::undefined")]
    pub z_score: f64,
    /// Set by the significance classifier
    pub significant: bool,
}

impl ShiftEstimate {
    /// Estimate for a phase where at least one group has no values
    pub fn undefined(confidence_level: f64) -> Self {
        Self {
            point_estimate: f64::NAN,
            ci_low: f64::NAN,
            ci_high: f64::NAN,
            confidence_level,
            p_value: f64::NAN,
            u_statistic: f64::NAN,
            z_score: f64::NAN,
            significant: false,
        }
    }

    /// Whether the interval contains zero
    pub fn ci_contains_zero(&self) -> bool {
        self.ci_low <= 0.0 && self.ci_high >= 0.0
    }
}

/// Estimate the shift of `experiment` relative to `control`
///
/// Returns `None` when either group is empty. `significant` is always
/// `false` here; see `classify_significance`.
///
/// # Example
/// ```
/// use veredicto::compare::estimate_shift;
///
/// let control = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let experiment = [11.0, 12.0, 13.0, 14.0, 15.0];
///
/// let shift = estimate_shift(&control, &experiment, 0.95).unwrap();
/// assert_eq!(shift.point_estimate, 10.0);
/// assert!(!shift.ci_contains_zero());
/// ```
pub fn estimate_shift(
    control: &[f64],
    experiment: &[f64],
    confidence_level: f64,
) -> Option<ShiftEstimate> {
    if control.is_empty() || experiment.is_empty() {
        return None;
    }

    let n = control.len();
    let m = experiment.len();
    let diffs = pairwise_differences(control, experiment);

    let (lower_rank, upper_rank) = confidence_ranks(n, m, 1.0 - confidence_level);
    let (u_statistic, z_score, p_value) = mann_whitney(&diffs, n, m);

    Some(ShiftEstimate {
        point_estimate: median(&diffs),
        ci_low: diffs[lower_rank - 1],
        ci_high: diffs[upper_rank - 1],
        confidence_level,
        p_value,
        u_statistic,
        z_score,
        significant: false,
    })
}

/// All `e - c` differences, sorted ascending
pub fn pairwise_differences(control: &[f64], experiment: &[f64]) -> Vec<f64> {
    let mut diffs = Vec::with_capacity(control.len() * experiment.len());
    for &e in experiment {
        for &c in control {
            diffs.push(e - c);
        }
    }
    diffs.sort_by(f64::total_cmp);
    diffs
}

/// 1-indexed ranks of the interval bounds within the sorted differences
///
/// `Cα = z(1-α/2)·sqrt(n·m·(n+m+1)/12)`, lower = `round(N/2 - Cα/2)`,
/// upper = `round(N/2 + Cα/2) + 1`, both clamped to `[1, N]`.
pub fn confidence_ranks(n: usize, m: usize, alpha: f64) -> (usize, usize) {
    let total = (n * m) as f64;
    let c_alpha = standard_normal_quantile(1.0 - alpha / 2.0) * u_std_dev(n, m);

    let clamp = |rank: f64| rank.clamp(1.0, total) as usize;
    let lower = clamp((total / 2.0 - c_alpha / 2.0).round());
    let upper = clamp((total / 2.0 + c_alpha / 2.0).round() + 1.0);
    (lower, upper)
}

/// Standard deviation of U under the null hypothesis
fn u_std_dev(n: usize, m: usize) -> f64 {
    let (n, m) = (n as f64, m as f64);
    (n * m * (n + m + 1.0) / 12.0).sqrt()
}

/// `(U, z, p)` from the sorted difference multiset
fn mann_whitney(diffs: &[f64], n: usize, m: usize) -> (f64, f64, f64) {
    let wins = diffs.iter().filter(|&&d| d > 0.0).count() as f64;
    let ties = diffs.iter().filter(|&&d| d == 0.0).count() as f64;
    let u = wins + 0.5 * ties;

    let mean = (n * m) as f64 / 2.0;
    let deviation = u - mean;
    let corrected = (deviation.abs() - 0.5).max(0.0);
    let z = corrected.copysign(deviation) / u_std_dev(n, m);

    let p = erfc(z.abs() / SQRT_2).min(1.0);
    (u, z, p)
}

/// Inverse CDF of the standard normal distribution
pub fn standard_normal_quantile(p: f64) -> f64 {
    SQRT_2 * erf_inv(2.0 * p - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_for_95_percent() {
        let z = standard_normal_quantile(0.975);
        assert!((z - 1.959964).abs() < 1e-5, "z = {}", z);
    }

    #[test]
    fn test_identical_groups_centered_on_zero() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let shift = estimate_shift(&values, &values, 0.95).unwrap();
        assert_eq!(shift.point_estimate, 0.0);
        assert!(shift.ci_contains_zero());
        // N = 25, ranks 8 and 18 of the difference multiset
        assert_eq!(shift.ci_low, -10.0);
        assert_eq!(shift.ci_high, 10.0);
        assert_eq!(shift.u_statistic, 12.5);
        assert!((shift.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pure_shift() {
        let control = [1.0, 2.0, 3.0, 4.0, 5.0];
        let experiment = [11.0, 12.0, 13.0, 14.0, 15.0];
        let shift = estimate_shift(&control, &experiment, 0.95).unwrap();
        assert_eq!(shift.point_estimate, 10.0);
        assert_eq!(shift.ci_low, 9.0);
        assert_eq!(shift.ci_high, 11.0);
        assert_eq!(shift.u_statistic, 25.0);
        assert!(shift.z_score > 2.4);
        assert!(shift.p_value < 0.05, "p = {}", shift.p_value);
    }

    #[test]
    fn test_shift_is_antisymmetric() {
        let a = [3.0, 7.0, 1.0, 9.0];
        let b = [4.0, 12.0, 8.0];
        let forward = estimate_shift(&a, &b, 0.95).unwrap();
        let backward = estimate_shift(&b, &a, 0.95).unwrap();
        assert_eq!(forward.point_estimate, -backward.point_estimate);
        assert_eq!(forward.p_value, backward.p_value);
    }

    #[test]
    fn test_robust_to_single_outlier() {
        let control = [10.0, 11.0, 10.0, 12.0, 11.0];
        let experiment = [10.0, 11.0, 10.0, 12.0, 1000.0];
        let shift = estimate_shift(&control, &experiment, 0.95).unwrap();
        assert!(shift.point_estimate.abs() <= 1.0);
        assert!(shift.ci_contains_zero());
    }

    #[test]
    fn test_single_value_groups_are_computable() {
        let shift = estimate_shift(&[5.0], &[9.0, 10.0], 0.95).unwrap();
        assert_eq!(shift.point_estimate, 4.5);
        assert_eq!(shift.ci_low, 4.0);
        assert_eq!(shift.ci_high, 5.0);
    }

    #[test]
    fn test_empty_group_has_no_estimate() {
        assert!(estimate_shift(&[], &[1.0], 0.95).is_none());
        assert!(estimate_shift(&[1.0], &[], 0.95).is_none());
    }

    #[test]
    fn test_ranks_clamped() {
        let (lower, upper) = confidence_ranks(1, 1, 0.05);
        assert_eq!((lower, upper), (1, 1));

        let (lower, upper) = confidence_ranks(5, 5, 0.05);
        assert_eq!((lower, upper), (8, 18));
    }

    #[test]
    fn test_wider_confidence_widens_interval() {
        let (lo95, hi95) = confidence_ranks(20, 20, 0.05);
        let (lo99, hi99) = confidence_ranks(20, 20, 0.01);
        assert!(lo99 <= lo95);
        assert!(hi99 >= hi95);
    }

    #[test]
    fn test_pairwise_differences_sorted_numerically() {
        let diffs = pairwise_differences(&[1.0, 100.0], &[10.0, 9.0]);
        assert_eq!(diffs, vec![-91.0, -90.0, 8.0, 9.0]);
    }

    #[test]
    fn test_undefined_estimate() {
        let shift = ShiftEstimate::undefined(0.95);
        assert!(shift.point_estimate.is_nan());
        assert!(!shift.significant);
    }
}
