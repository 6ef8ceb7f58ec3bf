// Configuration for control vs experiment comparison
//
// Every threshold the engine applies lives here. Named variants are a closed
// enum (`Preset`) so an unknown name fails at the boundary instead of leaking
// half-initialized settings into the comparison.

use crate::error::{CompareError, Result};
use crate::sample::Unit;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest accepted `histogram_bin_count`
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Minimum practically-meaningful shift, per unit
///
/// A statistically detectable shift smaller than this is reported as not
/// significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumEffect {
    /// Milliseconds
    pub time: f64,
    /// Score points
    pub score: f64,
}

impl Default for MinimumEffect {
    fn default() -> Self {
        Self {
            time: 1.0,
            score: 1.0,
        }
    }
}

impl MinimumEffect {
    pub fn for_unit(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Time => self.time,
            Unit::Score => self.score,
        }
    }
}

/// Configuration for a comparison run
///
/// # Example
/// ```
/// use veredicto::compare::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert!((config.alpha() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Confidence level of the shift interval, in (0, 1)
    ///
    /// - 0.95 (default): 95% interval
    /// - 0.99: wider interval, fewer phases flagged
    /// - 0.90: narrower interval, more phases flagged
    pub confidence_level: f64,

    /// Absolute minimum effect per unit
    pub minimum_effect: MinimumEffect,

    /// Target number of histogram bins per phase
    pub histogram_bin_count: usize,

    /// Minimum values per group before a significance call is trusted
    ///
    /// Below this the normal approximation to the Mann-Whitney distribution is
    /// unreliable and results are marked low-confidence.
    pub min_sample_size: usize,

    /// Score points to time-axis factor for cumulative charts
    ///
    /// Only used to lay score phases out on the stacked timeline. Never
    /// applied to values fed to the shift estimator.
    pub score_time_scale: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            minimum_effect: MinimumEffect::default(),
            histogram_bin_count: 10,
            min_sample_size: 2,
            score_time_scale: 100.0,
        }
    }
}

impl ComparisonConfig {
    /// Significance level (`1 - confidence_level`)
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence_level
    }

    /// Build the configuration for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self::default(),
            Preset::Strict => Self::strict(),
            Preset::Permissive => Self::permissive(),
        }
    }

    /// Fewer flagged phases: 99% interval, at least 5 samples per group
    pub fn strict() -> Self {
        Self {
            confidence_level: 0.99,
            min_sample_size: 5,
            ..Self::default()
        }
    }

    /// More flagged phases: 90% interval, half-unit minimum effect
    pub fn permissive() -> Self {
        Self {
            confidence_level: 0.90,
            minimum_effect: MinimumEffect {
                time: 0.5,
                score: 0.5,
            },
            ..Self::default()
        }
    }

    /// Parse and validate a TOML configuration
    ///
    /// Missing keys fall back to defaults.
    ///
    /// # Example TOML
    /// ```toml
    /// confidence_level = 0.99
    /// histogram_bin_count = 12
    ///
    /// [minimum_effect]
    /// time = 2.0
    /// score = 1.0
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CompareError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(CompareError::InvalidConfig(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }

        for (unit, effect) in [
            (Unit::Time, self.minimum_effect.time),
            (Unit::Score, self.minimum_effect.score),
        ] {
            if !(effect.is_finite() && effect >= 0.0) {
                return Err(CompareError::InvalidConfig(format!(
                    "minimum_effect.{} must be a non-negative number, got {}",
                    unit, effect
                )));
            }
        }

        if self.histogram_bin_count == 0 || self.histogram_bin_count > MAX_HISTOGRAM_BINS {
            return Err(CompareError::InvalidConfig(format!(
                "histogram_bin_count must be in 1..={}, got {}",
                MAX_HISTOGRAM_BINS, self.histogram_bin_count
            )));
        }

        if self.min_sample_size < 2 {
            return Err(CompareError::InvalidConfig(format!(
                "min_sample_size must be >= 2 for the rank interval, got {}",
                self.min_sample_size
            )));
        }

        if !(self.score_time_scale.is_finite() && self.score_time_scale > 0.0) {
            return Err(CompareError::InvalidConfig(format!(
                "score_time_scale must be positive, got {}",
                self.score_time_scale
            )));
        }

        Ok(())
    }
}

/// Named configuration variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Standard,
    Strict,
    Permissive,
}

impl FromStr for Preset {
    type Err = CompareError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "standard" => Ok(Preset::Standard),
            "strict" => Ok(Preset::Strict),
            "permissive" => Ok(Preset::Permissive),
            other => Err(CompareError::UnknownPreset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComparisonConfig::default();
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.minimum_effect.for_unit(Unit::Time), 1.0);
        assert_eq!(config.minimum_effect.for_unit(Unit::Score), 1.0);
        assert_eq!(config.histogram_bin_count, 10);
        assert_eq!(config.min_sample_size, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ComparisonConfig::strict();
        assert_eq!(config.confidence_level, 0.99);
        assert_eq!(config.min_sample_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = ComparisonConfig::permissive();
        assert_eq!(config.confidence_level, 0.90);
        assert_eq!(config.minimum_effect.time, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("strict".parse::<Preset>().unwrap(), Preset::Strict);
        assert_eq!(
            ComparisonConfig::from_preset("permissive".parse().unwrap()),
            ComparisonConfig::permissive()
        );
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let err = "turbo".parse::<Preset>().unwrap_err();
        assert_eq!(err, CompareError::UnknownPreset("turbo".to_string()));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_confidence_level() {
        let mut config = ComparisonConfig::default();
        config.confidence_level = 1.0;
        assert!(config.validate().is_err());
        config.confidence_level = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_bin_count() {
        let mut config = ComparisonConfig::default();
        config.histogram_bin_count = 0;
        assert!(config.validate().is_err());
        config.histogram_bin_count = MAX_HISTOGRAM_BINS + 1;
        assert!(config.validate().is_err());
        config.histogram_bin_count = MAX_HISTOGRAM_BINS;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_min_sample_size() {
        let mut config = ComparisonConfig::default();
        config.min_sample_size = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_negative_minimum_effect() {
        let mut config = ComparisonConfig::default();
        config.minimum_effect.score = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ComparisonConfig::from_toml_str(
            "confidence_level = 0.99\n[minimum_effect]\ntime = 2.5\n",
        )
        .unwrap();
        assert_eq!(config.confidence_level, 0.99);
        assert_eq!(config.minimum_effect.time, 2.5);
        assert_eq!(config.minimum_effect.score, 1.0);
        assert_eq!(config.histogram_bin_count, 10);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let err = ComparisonConfig::from_toml_str("histogram_bin_count = 0").unwrap_err();
        assert!(matches!(err, CompareError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_toml_rejects_huge_bin_count() {
        let err =
            ComparisonConfig::from_toml_str("histogram_bin_count = 1000000000000").unwrap_err();
        assert!(matches!(
            err,
            CompareError::InvalidConfig(ref msg) if msg.contains("histogram_bin_count")
        ));
    }

    #[test]
    fn test_from_toml_rejects_bad_syntax() {
        assert!(ComparisonConfig::from_toml_str("confidence_level = = 1").is_err());
    }
}
