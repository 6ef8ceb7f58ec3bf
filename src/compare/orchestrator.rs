// Comparison orchestration
//
// Drives bucketing, summaries, shift estimation, classification and binning
// for every phase, then assembles the report. Pure: the same samples and
// configuration always produce the same report, and nothing is read from or
// written to the environment.

use crate::compare::bucket::{bucket_phases, PhaseBucket};
use crate::compare::config::ComparisonConfig;
use crate::compare::cumulative::{build_cumulative_charts, CumulativeChart};
use crate::compare::histogram::{build_histogram, Histogram};
use crate::compare::quantile::QuantileSummary;
use crate::compare::shift::{estimate_shift, ShiftEstimate};
use crate::compare::significance::{classify_significance, DataQuality};
use crate::compare::verdict::{ComparisonVerdict, Direction, VerdictTally};
use crate::error::Result;
use crate::identifier::phase_identifier;
use crate::sample::{Sample, Sign, Unit};
use serde::{Deserialize, Serialize};

/// Comparison of one phase between control and experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub phase: String,
    /// Stable lookup key derived from the phase name
    pub identifier: String,
    pub unit: Unit,
    pub sign: Sign,
    pub control_count: usize,
    pub experiment_count: usize,
    pub control: QuantileSummary,
    pub experiment: QuantileSummary,
    pub shift: ShiftEstimate,
    pub histogram: Histogram,
    pub data_quality: DataQuality,
    pub direction: Direction,
}

impl ComparisonResult {
    pub fn is_significant(&self) -> bool {
        self.shift.significant
    }
}

/// Everything a renderer needs for one control/experiment comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// One result per phase, `"duration"` first
    pub results: Vec<ComparisonResult>,
    /// One stacked-timeline chart per unit
    pub charts: Vec<CumulativeChart>,
    pub verdict: ComparisonVerdict,
}

impl ComparisonReport {
    /// Result for a phase by name
    pub fn result(&self, phase: &str) -> Option<&ComparisonResult> {
        self.results.iter().find(|r| r.phase == phase)
    }
}

/// Compare control samples against experiment samples
///
/// # Errors
/// Fails on invalid configuration or on a data-integrity violation in the
/// samples (see `bucket_phases`). Sparse phases never fail; they are marked
/// with a low-confidence `DataQuality`.
///
/// # Example
/// ```
/// use veredicto::compare::{compare_samples, ComparisonConfig, ComparisonVerdict};
/// use veredicto::sample::{PhaseMeasurement, Sample};
///
/// let run = |total: f64, paint: f64| {
///     Sample::new(total, vec![PhaseMeasurement::time("paint", 0.0, paint)])
/// };
/// let control: Vec<_> = (0..5).map(|i| run(100.0 + i as f64, 10.0 + i as f64)).collect();
/// let experiment: Vec<_> = (0..5).map(|i| run(100.0 + i as f64, 30.0 + i as f64)).collect();
///
/// let report = compare_samples(&control, &experiment, &ComparisonConfig::default())?;
/// assert_eq!(report.results[0].phase, "duration");
/// assert!(report.result("paint").unwrap().is_significant());
/// assert!(matches!(report.verdict, ComparisonVerdict::Regression { .. }));
/// # Ok::<(), veredicto::error::CompareError>(())
/// ```
pub fn compare_samples(
    control: &[Sample],
    experiment: &[Sample],
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    config.validate()?;

    let buckets = bucket_phases(control, experiment)?;
    tracing::debug!(
        "Comparing {} phases ({} control samples, {} experiment samples)",
        buckets.phases().len(),
        control.len(),
        experiment.len()
    );

    let results: Vec<ComparisonResult> = buckets
        .iter()
        .map(|(phase, control, experiment)| compare_phase(phase, control, experiment, config))
        .collect();

    let charts = build_cumulative_charts(control, experiment, &buckets, config.score_time_scale);
    let verdict = ComparisonVerdict::from_results(&results, config.min_sample_size);
    tracing::info!("Comparison verdict: {:?}", verdict);

    Ok(ComparisonReport {
        results,
        charts,
        verdict,
    })
}

/// Compare and record the outcome into a caller-owned tally
pub fn compare_samples_into(
    tally: &mut VerdictTally,
    control: &[Sample],
    experiment: &[Sample],
    config: &ComparisonConfig,
) -> Result<ComparisonReport> {
    let report = compare_samples(control, experiment, config)?;
    tally.record(&report);
    Ok(report)
}

/// Compare one phase's control and experiment buckets
///
/// Both buckets must describe the same phase (same sign and unit).
pub fn compare_phase(
    phase: &str,
    control: &PhaseBucket,
    experiment: &PhaseBucket,
    config: &ComparisonConfig,
) -> ComparisonResult {
    let (unit, sign) = (control.unit, control.sign);
    let quality = DataQuality::assess(control.len(), experiment.len(), config.min_sample_size);

    let mut shift = estimate_shift(&control.values, &experiment.values, config.confidence_level)
        .unwrap_or_else(|| ShiftEstimate::undefined(config.confidence_level));
    shift.significant =
        classify_significance(&shift, quality, config.minimum_effect.for_unit(unit));

    if quality.is_low_confidence() {
        tracing::warn!(
            "Phase '{}' is low-confidence ({:?}): control={}, experiment={}, min_sample_size={}",
            phase,
            quality,
            control.len(),
            experiment.len(),
            config.min_sample_size
        );
    }

    let direction = Direction::classify(shift.significant, quality, sign, shift.point_estimate);
    tracing::debug!(
        "Phase '{}': shift={:.3} CI=[{:.3}, {:.3}] p={:.4} → {:?}",
        phase,
        shift.point_estimate,
        shift.ci_low,
        shift.ci_high,
        shift.p_value,
        direction
    );

    ComparisonResult {
        phase: phase.to_string(),
        identifier: phase_identifier(phase),
        unit,
        sign,
        control_count: control.len(),
        experiment_count: experiment.len(),
        control: QuantileSummary::compute(&control.values),
        experiment: QuantileSummary::compute(&experiment.values),
        shift,
        histogram: build_histogram(
            &control.values,
            &experiment.values,
            config.histogram_bin_count,
            unit,
        ),
        data_quality: quality,
        direction,
    }
}
