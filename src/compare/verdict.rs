// Per-phase direction and overall verdict
//
// A significant shift is a regression or an improvement depending on the
// phase's sign: a slower "render" regresses, a higher "performance-score"
// improves. The overall verdict rolls the per-phase directions up, and the
// text report renders both for terminal output.

use crate::compare::orchestrator::{ComparisonReport, ComparisonResult};
use crate::compare::significance::DataQuality;
use crate::sample::Sign;
use serde::{Deserialize, Serialize};

/// Outcome of one phase comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Significant shift in the better direction
    Improvement,
    /// Significant shift in the worse direction
    Regression,
    /// Enough data, no significant shift
    NoChange,
    /// Too little data to decide
    Inconclusive,
}

impl Direction {
    pub fn classify(
        significant: bool,
        quality: DataQuality,
        sign: Sign,
        point_estimate: f64,
    ) -> Self {
        if significant {
            if point_estimate * sign.factor() > 0.0 {
                Direction::Regression
            } else {
                Direction::Improvement
            }
        } else if quality.is_low_confidence() {
            Direction::Inconclusive
        } else {
            Direction::NoChange
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Improvement => "improvement",
            Direction::Regression => "regression",
            Direction::NoChange => "no change",
            Direction::Inconclusive => "inconclusive",
        }
    }
}

/// Overall verdict for a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ComparisonVerdict {
    /// No phase regressed
    NoRegression {
        /// Phases that improved significantly
        improved_phases: Vec<String>,
    },

    /// At least one phase regressed significantly
    Regression {
        regressed_phases: Vec<String>,
        improved_phases: Vec<String>,
    },

    /// Every phase is low-confidence
    InsufficientData { reason: String },
}

impl ComparisonVerdict {
    /// Roll per-phase directions up into a verdict
    pub fn from_results(results: &[ComparisonResult], min_sample_size: usize) -> Self {
        if results.iter().all(|r| r.data_quality.is_low_confidence()) {
            return ComparisonVerdict::InsufficientData {
                reason: format!(
                    "No phase has at least {} samples in both groups ({} phases compared)",
                    min_sample_size,
                    results.len()
                ),
            };
        }

        let phases_with = |direction: Direction| -> Vec<String> {
            results
                .iter()
                .filter(|r| r.direction == direction)
                .map(|r| r.phase.clone())
                .collect()
        };
        let regressed_phases = phases_with(Direction::Regression);
        let improved_phases = phases_with(Direction::Improvement);

        if regressed_phases.is_empty() {
            ComparisonVerdict::NoRegression { improved_phases }
        } else {
            ComparisonVerdict::Regression {
                regressed_phases,
                improved_phases,
            }
        }
    }
}

/// Caller-owned tally of phase outcomes across comparisons
///
/// Pass the same tally to several `compare_samples_into` calls to aggregate a
/// suite of benchmarks. Each tally is independent; nothing is shared between
/// instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictTally {
    pub comparisons: usize,
    pub regressions: usize,
    pub improvements: usize,
    pub unchanged: usize,
    pub inconclusive: usize,
}

impl VerdictTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every phase of a report to the tally
    pub fn record(&mut self, report: &ComparisonReport) {
        self.comparisons += 1;
        for result in &report.results {
            match result.direction {
                Direction::Regression => self.regressions += 1,
                Direction::Improvement => self.improvements += 1,
                Direction::NoChange => self.unchanged += 1,
                Direction::Inconclusive => self.inconclusive += 1,
            }
        }
    }

    /// Total phases recorded
    pub fn phases(&self) -> usize {
        self.regressions + self.improvements + self.unchanged + self.inconclusive
    }
}

impl ComparisonReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match &self.verdict {
            ComparisonVerdict::NoRegression { improved_phases } => {
                report.push_str("✅ NO REGRESSION DETECTED\n\n");
                if !improved_phases.is_empty() {
                    report.push_str(&format!("Improved phases: {}\n", improved_phases.join(", ")));
                }
            }
            ComparisonVerdict::Regression {
                regressed_phases,
                improved_phases,
            } => {
                report.push_str(&format!(
                    "❌ REGRESSION DETECTED ({} phases)\n\n",
                    regressed_phases.len()
                ));
                report.push_str(&format!("Regressed phases: {}\n", regressed_phases.join(", ")));
                if !improved_phases.is_empty() {
                    report.push_str(&format!("Improved phases: {}\n", improved_phases.join(", ")));
                }
            }
            ComparisonVerdict::InsufficientData { reason } => {
                report.push_str("⚠️  INSUFFICIENT DATA\n\n");
                report.push_str(&format!("Reason: {}\n", reason));
            }
        }

        report.push_str(&format!("Phases compared: {}\n", self.results.len()));

        if !self.results.is_empty() {
            report.push_str("\n📊 Phase Comparisons:\n");
            for result in &self.results {
                report.push_str(&format_result_line(result));
            }
        }

        report
    }
}

fn format_result_line(result: &ComparisonResult) -> String {
    let unit = result.unit.label();
    let mut line = format!(
        "  {} (n={}/{}): control median={:.2} {}, experiment median={:.2} {}",
        result.phase,
        result.control_count,
        result.experiment_count,
        result.control.median,
        unit,
        result.experiment.median,
        unit,
    );

    if result.control_count > 0 && result.experiment_count > 0 {
        line.push_str(&format!(
            ", shift={:+.2} {} ({:.0}% CI {:.2}..{:.2}, p={:.4})",
            result.shift.point_estimate,
            unit,
            result.shift.confidence_level * 100.0,
            result.shift.ci_low,
            result.shift.ci_high,
            result.shift.p_value,
        ));
    }

    line.push_str(&format!(" → {}", result.direction.label()));
    if result.data_quality.is_low_confidence() {
        line.push_str(" ⚠️ low confidence");
    }
    line.push('\n');
    line
}
