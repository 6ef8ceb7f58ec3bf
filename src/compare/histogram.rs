// Shared-bin histograms for frequency charts
//
// Both groups are counted against the same edges so the renderer can overlay
// them bar-for-bar. Bins are closed-open `[edge[i], edge[i+1])` except the
// last, which also includes the maximum.

use crate::sample::Unit;
use serde::{Deserialize, Serialize};

/// Bin labels and per-group counts, index-aligned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` edges, ascending
    pub edges: Vec<f64>,
    /// `"{min}-{max} {unit}"` per bin
    pub labels: Vec<String>,
    pub control_counts: Vec<usize>,
    pub experiment_counts: Vec<usize>,
}

impl Histogram {
    /// Histogram with no bins (both groups empty)
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            labels: Vec::new(),
            control_counts: Vec::new(),
            experiment_counts: Vec::new(),
        }
    }

    pub fn bin_count(&self) -> usize {
        self.labels.len()
    }
}

/// Bin both groups over the combined value range
///
/// Uses `target_bins` equal-width bins, or a single bin when every value is
/// identical.
///
/// # Example
/// ```
/// use veredicto::compare::build_histogram;
/// use veredicto::sample::Unit;
///
/// let histogram = build_histogram(&[0.0, 1.0, 2.0], &[3.0, 4.0], 2, Unit::Time);
/// assert_eq!(histogram.labels, vec!["0-2 ms", "2-4 ms"]);
/// assert_eq!(histogram.control_counts, vec![2, 1]);
/// assert_eq!(histogram.experiment_counts, vec![0, 2]);
/// ```
pub fn build_histogram(
    control: &[f64],
    experiment: &[f64],
    target_bins: usize,
    unit: Unit,
) -> Histogram {
    let combined = control.iter().chain(experiment.iter()).copied();
    let Some((min, max)) = combined.fold(None, |range: Option<(f64, f64)>, v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Histogram::empty();
    };

    let edges = bin_edges(min, max, target_bins.max(1));

    let labels = edges
        .windows(2)
        .map(|w| format!("{}-{} {}", format_bound(w[0]), format_bound(w[1]), unit.label()))
        .collect();

    Histogram {
        control_counts: count_into_bins(control, &edges),
        experiment_counts: count_into_bins(experiment, &edges),
        edges,
        labels,
    }
}

fn bin_edges(min: f64, max: f64, target_bins: usize) -> Vec<f64> {
    if max <= min {
        return vec![min, max];
    }

    let width = (max - min) / target_bins as f64;
    let mut edges: Vec<f64> = (0..target_bins).map(|i| min + i as f64 * width).collect();
    edges.push(max);
    edges
}

fn count_into_bins(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len() - 1;
    let interior = &edges[1..bins];
    let mut counts = vec![0; bins];
    for &v in values {
        // Interior edges <= v; the maximum lands in the last bin
        let idx = interior.partition_point(|&edge| edge <= v);
        counts[idx] += 1;
    }
    counts
}

/// Integers without decimals, everything else to two decimals
fn format_bound(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
