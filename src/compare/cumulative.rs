// Cumulative (stacked timeline) chart data
//
// Each phase contributes its per-sample end offset (`start + duration`).
// Score phases are projected onto the time axis with `score_time_scale` so
// they stack proportionally next to time phases. This projection is for
// display only; significance always uses the raw per-phase values.

use crate::compare::bucket::{PhaseBuckets, DURATION_PHASE};
use crate::identifier::phase_identifier;
use crate::sample::{Group, Sample, Sign, Unit};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-sample cumulative values of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub phase: String,
    pub identifier: String,
    /// Orientation, for "lower/higher is better" labels
    pub sign: Sign,
    /// One value per control sample that reported the phase
    pub control: Vec<f64>,
    /// One value per experiment sample that reported the phase
    pub experiment: Vec<f64>,
}

/// All phases sharing one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeChart {
    pub unit: Unit,
    pub series: Vec<CumulativeSeries>,
}

/// Project a value onto the chart's time axis
pub fn time_axis_value(unit: Unit, value: f64, score_time_scale: f64) -> f64 {
    match unit {
        Unit::Time => value,
        Unit::Score => value * score_time_scale,
    }
}

/// Build one chart per unit, series in phase order
///
/// The synthetic `"duration"` phase is not charted: it is the whole run,
/// not a slice of it.
pub fn build_cumulative_charts(
    control: &[Sample],
    experiment: &[Sample],
    buckets: &PhaseBuckets,
    score_time_scale: f64,
) -> Vec<CumulativeChart> {
    let mut series: Vec<(Unit, CumulativeSeries)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (phase, bucket, _) in buckets.iter() {
        if phase == DURATION_PHASE {
            continue;
        }
        index.insert(phase, series.len());
        series.push((
            bucket.unit,
            CumulativeSeries {
                phase: phase.to_string(),
                identifier: phase_identifier(phase),
                sign: bucket.sign,
                control: Vec::new(),
                experiment: Vec::new(),
            },
        ));
    }

    for (group, samples) in [(Group::Control, control), (Group::Experiment, experiment)] {
        for sample in samples {
            for measurement in &sample.phases {
                let Some(&idx) = index.get(measurement.phase.as_str()) else {
                    continue;
                };
                let value =
                    time_axis_value(measurement.unit, measurement.end(), score_time_scale);
                let entry = &mut series[idx].1;
                match group {
                    Group::Control => entry.control.push(value),
                    Group::Experiment => entry.experiment.push(value),
                }
            }
        }
    }

    let mut by_unit: BTreeMap<Unit, Vec<CumulativeSeries>> = BTreeMap::new();
    for (unit, entry) in series {
        by_unit.entry(unit).or_default().push(entry);
    }

    by_unit
        .into_iter()
        .map(|(unit, series)| CumulativeChart { unit, series })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::bucket::bucket_phases;
    use crate::sample::PhaseMeasurement;

    fn charts(control: &[Sample], experiment: &[Sample]) -> Vec<CumulativeChart> {
        let buckets = bucket_phases(control, experiment).unwrap();
        build_cumulative_charts(control, experiment, &buckets, 100.0)
    }

    #[test]
    fn test_cumulative_is_start_plus_duration() {
        let control = vec![Sample::new(
            50.0,
            vec![
                PhaseMeasurement::time("boot", 0.0, 10.0),
                PhaseMeasurement::time("render", 10.0, 15.0),
            ],
        )];
        let result = charts(&control, &[]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].unit, Unit::Time);
        let series = &result[0].series;
        assert_eq!(series[0].phase, "boot");
        assert_eq!(series[0].control, vec![10.0]);
        assert_eq!(series[1].phase, "render");
        assert_eq!(series[1].control, vec![25.0]);
        assert!(series[1].experiment.is_empty());
    }

    #[test]
    fn test_grouped_by_unit_time_first() {
        let experiment = vec![Sample::new(
            50.0,
            vec![
                PhaseMeasurement::score("perf-score", 0.9),
                PhaseMeasurement::time("paint", 3.0, 4.0),
            ],
        )];
        let result = charts(&[], &experiment);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].unit, Unit::Time);
        assert_eq!(result[0].series[0].phase, "paint");
        assert_eq!(result[1].unit, Unit::Score);
        assert_eq!(result[1].series[0].sign, Sign::HigherIsBetter);
    }

    #[test]
    fn test_score_projected_onto_time_axis() {
        let experiment = vec![Sample::new(1.0, vec![PhaseMeasurement::score("perf-score", 0.5)])];
        let result = charts(&[], &experiment);
        assert_eq!(result[0].series[0].experiment, vec![50.0]);
    }

    #[test]
    fn test_duration_not_charted() {
        let result = charts(&[Sample::new(10.0, vec![])], &[Sample::new(12.0, vec![])]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_series_carry_identifier() {
        let control = vec![Sample::new(1.0, vec![PhaseMeasurement::time("load", 0.0, 1.0)])];
        let result = charts(&control, &[]);
        assert_eq!(result[0].series[0].identifier, phase_identifier("load"));
    }
}
