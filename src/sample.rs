//! Benchmark sample data model
//!
//! A `Sample` is one complete benchmark run as handed over by the measurement
//! collector: the total run time plus the ordered phase measurements extracted
//! from its trace. Samples are read-only to the comparison engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric orientation: which direction of change is an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Sign {
    /// `+1`: smaller values are better (latencies, durations)
    LowerIsBetter,
    /// `-1`: larger values are better (audit scores)
    HigherIsBetter,
}

impl Sign {
    /// Numeric orientation factor (`+1.0` or `-1.0`)
    pub fn factor(self) -> f64 {
        match self {
            Sign::LowerIsBetter => 1.0,
            Sign::HigherIsBetter => -1.0,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::LowerIsBetter),
            -1 => Ok(Sign::HigherIsBetter),
            other => Err(format!("sign must be 1 or -1, got {}", other)),
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::LowerIsBetter => 1,
            Sign::HigherIsBetter => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::LowerIsBetter => write!(f, "+1 (lower is better)"),
            Sign::HigherIsBetter => write!(f, "-1 (higher is better)"),
        }
    }
}

/// Measurement unit of a phase
///
/// Ordering is significant: cumulative charts are emitted in `Unit` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Milliseconds
    Time,
    /// Audit score points
    Score,
}

impl Unit {
    /// Short label used in histogram bin labels
    pub fn label(self) -> &'static str {
        match self {
            Unit::Time => "ms",
            Unit::Score => "points",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Time => write!(f, "time"),
            Unit::Score => write!(f, "score"),
        }
    }
}

/// Which side of the comparison a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Control,
    Experiment,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Control => write!(f, "control"),
            Group::Experiment => write!(f, "experiment"),
        }
    }
}

/// One named sub-measurement of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMeasurement {
    /// Phase name (e.g., "paint", "first-contentful-paint")
    pub phase: String,
    /// Offset from the start of the run
    #[serde(default)]
    pub start: f64,
    /// Measured value (time span, or score for score-unit phases)
    pub duration: f64,
    pub sign: Sign,
    pub unit: Unit,
}

impl PhaseMeasurement {
    /// Time-unit phase where lower is better
    pub fn time(phase: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            phase: phase.into(),
            start,
            duration,
            sign: Sign::LowerIsBetter,
            unit: Unit::Time,
        }
    }

    /// Score-unit phase where higher is better
    pub fn score(phase: impl Into<String>, value: f64) -> Self {
        Self {
            phase: phase.into(),
            start: 0.0,
            duration: value,
            sign: Sign::HigherIsBetter,
            unit: Unit::Score,
        }
    }

    /// End offset of this phase within its run (`start + duration`)
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// One full benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Total run time in milliseconds
    pub duration: f64,
    #[serde(default)]
    pub phases: Vec<PhaseMeasurement>,
}

impl Sample {
    pub fn new(duration: f64, phases: Vec<PhaseMeasurement>) -> Self {
        Self { duration, phases }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_deserializes_from_integers() {
        let lower: Sign = serde_json::from_str("1").unwrap();
        let higher: Sign = serde_json::from_str("-1").unwrap();
        assert_eq!(lower, Sign::LowerIsBetter);
        assert_eq!(higher, Sign::HigherIsBetter);
        assert!(serde_json::from_str::<Sign>("0").is_err());
    }

    #[test]
    fn test_sign_serializes_to_integer() {
        assert_eq!(serde_json::to_string(&Sign::HigherIsBetter).unwrap(), "-1");
    }

    #[test]
    fn test_sample_json_shape() {
        let json = r#"{
            "duration": 1200.5,
            "phases": [
                {"phase": "render", "start": 10.0, "duration": 40.0, "sign": 1, "unit": "time"},
                {"phase": "performance-score", "duration": 87.0, "sign": -1, "unit": "score"}
            ]
        }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.phases.len(), 2);
        assert_eq!(sample.phases[0], PhaseMeasurement::time("render", 10.0, 40.0));
        assert_eq!(sample.phases[1], PhaseMeasurement::score("performance-score", 87.0));
    }

    #[test]
    fn test_unit_ordering_time_first() {
        assert!(Unit::Time < Unit::Score);
    }

    #[test]
    fn test_phase_end() {
        assert_eq!(PhaseMeasurement::time("a", 5.0, 7.5).end(), 12.5);
    }
}
