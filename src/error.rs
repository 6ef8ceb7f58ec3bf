//! Error types for the comparison engine
//!
//! Only data-integrity and configuration failures are errors. Sparse data
//! (an empty group, fewer than the minimum samples) is encoded in each
//! `ComparisonResult` as a `DataQuality` instead, so callers can still render
//! partial results.

use crate::sample::{Group, Sign, Unit};
use thiserror::Error;

/// Errors raised while bucketing samples or validating configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error(
        "Phase '{phase}' reported with inconsistent metadata: \
         expected sign {expected_sign} / unit {expected_unit}, \
         found sign {found_sign} / unit {found_unit}"
    )]
    PhaseMetadataMismatch {
        phase: String,
        expected_sign: Sign,
        found_sign: Sign,
        expected_unit: Unit,
        found_unit: Unit,
    },

    #[error("Empty phase name in {group} sample #{sample}")]
    EmptyPhaseName { group: Group, sample: usize },

    #[error("Phase name 'duration' is reserved for overall run time ({group} sample #{sample})")]
    ReservedPhaseName { group: Group, sample: usize },

    #[error("Non-finite value {value} for phase '{phase}' in {group} sample #{sample}")]
    NonFiniteMeasurement {
        phase: String,
        group: Group,
        sample: usize,
        value: f64,
    },

    #[error("Negative {field} {value} for phase '{phase}' in {group} sample #{sample}")]
    NegativeMeasurement {
        phase: String,
        field: &'static str,
        group: Group,
        sample: usize,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown preset: '{0}' (expected one of: standard, strict, permissive)")]
    UnknownPreset(String),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
