// Control vs experiment comparison engine
//
// Turns two sets of benchmark samples into per-phase statistical verdicts.
// Latency distributions are small, skewed and outlier-prone, so the engine
// is rank-based end to end:
//
// - Hodges-Lehmann shift estimate (median of pairwise differences)
// - Confidence interval from order statistics of those differences, ranks
//   from the normal approximation to Mann-Whitney U
// - Significance = interval excludes zero AND shift >= minimum effect
//
// References:
// Hodges, J. L. & Lehmann, E. L. (1963). Estimates of location based on rank
//     tests. Annals of Mathematical Statistics, 34(2).
// Bauer, D. F. (1972). Constructing confidence sets using rank statistics.
//     JASA, 67(339).
//
// Every function here is pure and synchronous. Phases are independent, so a
// caller may fan `compare_phase` out across threads if it wants to.

mod bucket;
mod config;
mod cumulative;
mod histogram;
mod orchestrator;
mod outlier;
mod quantile;
mod shift;
mod significance;
mod undefined;
mod verdict;

pub use bucket::{bucket_phases, PhaseBucket, PhaseBuckets, DURATION_PHASE};
pub use config::{ComparisonConfig, MinimumEffect, Preset, MAX_HISTOGRAM_BINS};
pub use cumulative::{build_cumulative_charts, time_axis_value, CumulativeChart, CumulativeSeries};
pub use histogram::{build_histogram, Histogram};
pub use orchestrator::{
    compare_phase, compare_samples, compare_samples_into, ComparisonReport, ComparisonResult,
};
pub use outlier::{detect_outliers, tukey_fences, TUKEY_FENCE_FACTOR};
pub use quantile::{percentile, QuantileSummary};
pub use shift::{
    confidence_ranks, estimate_shift, pairwise_differences, standard_normal_quantile,
    ShiftEstimate,
};
pub use significance::{classify_significance, DataQuality};
pub use verdict::{ComparisonVerdict, Direction, VerdictTally};
