// Phase bucketing: raw samples → per-phase value sequences
//
// Every phase name seen in either group gets a bucket on both sides, so a
// phase that only the experiment reports shows up as an empty control bucket
// rather than disappearing from the comparison.

use crate::error::{CompareError, Result};
use crate::sample::{Group, Sample, Sign, Unit};
use std::collections::HashMap;

/// Name of the synthetic phase built from each sample's total run time
pub const DURATION_PHASE: &str = "duration";

/// Ordered values of one phase for one group
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseBucket {
    /// Values in sample order
    pub values: Vec<f64>,
    pub sign: Sign,
    pub unit: Unit,
}

impl PhaseBucket {
    fn empty(sign: Sign, unit: Unit) -> Self {
        Self {
            values: Vec::new(),
            sign,
            unit,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Control and experiment buckets for every phase, in first-seen order
///
/// `"duration"` is always the first phase.
#[derive(Debug, Clone)]
pub struct PhaseBuckets {
    order: Vec<String>,
    index: HashMap<String, usize>,
    control: Vec<PhaseBucket>,
    experiment: Vec<PhaseBucket>,
}

impl PhaseBuckets {
    fn new() -> Self {
        let mut buckets = Self {
            order: Vec::new(),
            index: HashMap::new(),
            control: Vec::new(),
            experiment: Vec::new(),
        };
        buckets.slot(DURATION_PHASE, Sign::LowerIsBetter, Unit::Time);
        buckets
    }

    /// Index of the phase, creating empty buckets on both sides if unseen
    fn slot(&mut self, phase: &str, sign: Sign, unit: Unit) -> usize {
        if let Some(&idx) = self.index.get(phase) {
            return idx;
        }
        let idx = self.order.len();
        self.order.push(phase.to_string());
        self.index.insert(phase.to_string(), idx);
        self.control.push(PhaseBucket::empty(sign, unit));
        self.experiment.push(PhaseBucket::empty(sign, unit));
        idx
    }

    fn append(
        &mut self,
        group: Group,
        phase: &str,
        sign: Sign,
        unit: Unit,
        value: f64,
    ) -> Result<()> {
        let idx = self.slot(phase, sign, unit);
        let bucket = match group {
            Group::Control => &mut self.control[idx],
            Group::Experiment => &mut self.experiment[idx],
        };

        if bucket.sign != sign || bucket.unit != unit {
            return Err(CompareError::PhaseMetadataMismatch {
                phase: phase.to_string(),
                expected_sign: bucket.sign,
                found_sign: sign,
                expected_unit: bucket.unit,
                found_unit: unit,
            });
        }

        bucket.values.push(value);
        Ok(())
    }

    /// Phase names, `"duration"` first
    pub fn phases(&self) -> &[String] {
        &self.order
    }

    pub fn control(&self, phase: &str) -> Option<&PhaseBucket> {
        self.index.get(phase).map(|&idx| &self.control[idx])
    }

    pub fn experiment(&self, phase: &str) -> Option<&PhaseBucket> {
        self.index.get(phase).map(|&idx| &self.experiment[idx])
    }

    /// Iterate `(phase, control, experiment)` in phase order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhaseBucket, &PhaseBucket)> {
        self.order
            .iter()
            .zip(self.control.iter().zip(self.experiment.iter()))
            .map(|(name, (control, experiment))| (name.as_str(), control, experiment))
    }
}

/// Group raw samples into per-phase buckets for both groups
///
/// Fails on the first integrity violation: a phase whose sign or unit
/// disagrees with an earlier report of the same phase (in either group), an
/// empty phase name, a measurement named `"duration"`, a non-finite value, a
/// negative phase start or a negative run duration. Phase durations may be
/// negative since score-derived values are not bounded.
///
/// # Example
/// ```
/// use veredicto::compare::bucket_phases;
/// use veredicto::sample::{PhaseMeasurement, Sample};
///
/// let control = vec![Sample::new(100.0, vec![PhaseMeasurement::time("paint", 0.0, 12.0)])];
/// let experiment = vec![Sample::new(110.0, vec![])];
///
/// let buckets = bucket_phases(&control, &experiment).unwrap();
/// assert_eq!(buckets.phases(), ["duration", "paint"]);
/// assert_eq!(buckets.control("paint").unwrap().values, vec![12.0]);
/// assert!(buckets.experiment("paint").unwrap().is_empty());
/// ```
pub fn bucket_phases(control: &[Sample], experiment: &[Sample]) -> Result<PhaseBuckets> {
    let mut buckets = PhaseBuckets::new();

    for (group, samples) in [(Group::Control, control), (Group::Experiment, experiment)] {
        for (sample_idx, sample) in samples.iter().enumerate() {
            ensure_finite(DURATION_PHASE, group, sample_idx, sample.duration)?;
            ensure_non_negative(
                DURATION_PHASE,
                "duration",
                group,
                sample_idx,
                sample.duration,
            )?;
            buckets.append(
                group,
                DURATION_PHASE,
                Sign::LowerIsBetter,
                Unit::Time,
                sample.duration,
            )?;

            for measurement in &sample.phases {
                if measurement.phase.is_empty() {
                    return Err(CompareError::EmptyPhaseName {
                        group,
                        sample: sample_idx,
                    });
                }
                if measurement.phase == DURATION_PHASE {
                    return Err(CompareError::ReservedPhaseName {
                        group,
                        sample: sample_idx,
                    });
                }
                ensure_finite(&measurement.phase, group, sample_idx, measurement.start)?;
                ensure_finite(&measurement.phase, group, sample_idx, measurement.duration)?;
                ensure_non_negative(
                    &measurement.phase,
                    "start",
                    group,
                    sample_idx,
                    measurement.start,
                )?;

                buckets.append(
                    group,
                    &measurement.phase,
                    measurement.sign,
                    measurement.unit,
                    measurement.duration,
                )?;
            }
        }
    }

    Ok(buckets)
}

fn ensure_finite(phase: &str, group: Group, sample: usize, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CompareError::NonFiniteMeasurement {
            phase: phase.to_string(),
            group,
            sample,
            value,
        })
    }
}

fn ensure_non_negative(
    phase: &str,
    field: &'static str,
    group: Group,
    sample: usize,
    value: f64,
) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CompareError::NegativeMeasurement {
            phase: phase.to_string(),
            field,
            group,
            sample,
            value,
        })
    }
}
