// Significance classification
//
// A phase is flagged only when the interval excludes zero AND the estimated
// shift is at least the configured minimum effect for its unit. With too few
// samples the call is forced to "not significant" and the result is marked
// low-confidence instead of failing.

use crate::compare::shift::ShiftEstimate;
use serde::{Deserialize, Serialize};

/// How much data backs a comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    /// Both groups meet the minimum sample size
    Sufficient,
    /// At least one group is below the minimum sample size
    InsufficientSamples,
    /// Neither group has any values
    EmptyGroup,
}

impl DataQuality {
    /// Assess sample counts against the minimum sample size
    pub fn assess(control_count: usize, experiment_count: usize, min_sample_size: usize) -> Self {
        if control_count == 0 && experiment_count == 0 {
            DataQuality::EmptyGroup
        } else if control_count < min_sample_size || experiment_count < min_sample_size {
            DataQuality::InsufficientSamples
        } else {
            DataQuality::Sufficient
        }
    }

    pub fn is_low_confidence(self) -> bool {
        self != DataQuality::Sufficient
    }
}

/// Decide whether a shift is significant
///
/// # Example
/// ```
/// use veredicto::compare::{classify_significance, estimate_shift, DataQuality};
///
/// let shift = estimate_shift(&[1.0, 2.0, 3.0, 4.0, 5.0], &[11.0, 12.0, 13.0, 14.0, 15.0], 0.95)
///     .unwrap();
/// assert!(classify_significance(&shift, DataQuality::Sufficient, 1.0));
/// assert!(!classify_significance(&shift, DataQuality::Sufficient, 20.0));
/// assert!(!classify_significance(&shift, DataQuality::InsufficientSamples, 1.0));
/// ```
pub fn classify_significance(
    estimate: &ShiftEstimate,
    quality: DataQuality,
    minimum_effect: f64,
) -> bool {
    if quality.is_low_confidence() {
        return false;
    }
    !estimate.ci_contains_zero() && estimate.point_estimate.abs() >= minimum_effect
}
